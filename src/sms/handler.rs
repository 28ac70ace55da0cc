use axum::extract::{Form, State};
use chrono::Datelike;
use serde::Deserialize;
use tracing::info;

use crate::api::routes::ApiState;
use crate::config::{SMS_MAX_DISTANCE_KM, SMS_TOP_N};
use crate::location::{normalize_district, resolve_postal_code, PostalResolution, Vocabulary};
use crate::recommender::{recommend, RecommendRequest};

use super::session::{ChatStep, Registration};
use super::strings::{self, Lang, ALL_CROPS, MONTH_NAMES};

/// Results shown in one SMS; more than two overflows 160-char segments.
const SMS_RESULTS_SHOWN: usize = 2;

const RESET_WORDS: [&str; 5] = ["MENU", "HI", "HELLO", "START", "RESET"];

#[derive(Debug, Deserialize)]
pub struct SmsForm {
    #[serde(rename = "From")]
    pub from: String,
    #[serde(rename = "Body")]
    pub body: String,
}

/// Twilio-style webhook: form-encoded From/Body in, reply text out.
pub async fn sms_reply(State(state): State<ApiState>, Form(form): Form<SmsForm>) -> String {
    state.health.inc_sms();
    handle_message(&state, &form.from, &form.body)
}

pub fn handle_message(state: &ApiState, phone: &str, body: &str) -> String {
    let phone = phone.trim();
    let body = body.trim();
    let upper = body.to_uppercase();
    let lang = state.sessions.lang(phone);

    // Explicit language switch works from anywhere.
    if let Some(digit) = upper.strip_prefix("LANG ") {
        if let Some(new_lang) = Lang::from_digit(digit.trim()) {
            state.sessions.set_lang(phone, new_lang);
            return strings::lang_switched(new_lang).to_string();
        }
    }

    // Registration / district change via #PINCODE.
    if let Some(pincode) = body.strip_prefix('#') {
        return register(state, phone, lang, pincode.trim());
    }

    if upper == "HELP" || body == "?" {
        return strings::help(lang).to_string();
    }

    if RESET_WORDS.contains(&upper.as_str()) {
        state.sessions.clear_session(phone);
        return match state.sessions.user(phone) {
            Some(user) => {
                state.sessions.set_session(phone, ChatStep::Crop);
                strings::main_menu(lang, &user.district)
            }
            None => {
                state.sessions.set_session(phone, ChatStep::Language);
                strings::lang_menu().to_string()
            }
        };
    }

    let Some(step) = state.sessions.session(phone) else {
        // Idle phone: registered users get the crop menu, new ones the
        // language menu.
        return match state.sessions.user(phone) {
            Some(user) => {
                state.sessions.set_session(phone, ChatStep::Crop);
                strings::main_menu(lang, &user.district)
            }
            None => {
                state.sessions.set_session(phone, ChatStep::Language);
                strings::lang_menu().to_string()
            }
        };
    };

    match step {
        ChatStep::Language => match Lang::from_digit(body) {
            Some(chosen) => {
                state.sessions.set_lang(phone, chosen);
                state.sessions.clear_session(phone);
                strings::lang_set(chosen)
            }
            None => strings::lang_menu().to_string(),
        },

        ChatStep::Crop => match parse_menu_digit(body, ALL_CROPS.len()) {
            Some(i) => {
                let crop = ALL_CROPS[i - 1].to_string();
                let prompt = strings::crop_ok_ask_month(lang, &crop);
                state.sessions.set_session(phone, ChatStep::Month { crop });
                prompt
            }
            None => strings::invalid_crop(lang),
        },

        ChatStep::Month { crop } => {
            if body == "*" {
                state.sessions.set_session(phone, ChatStep::Crop);
                return match state.sessions.user(phone) {
                    Some(user) => strings::main_menu(lang, &user.district),
                    None => strings::fallback(lang).to_string(),
                };
            }
            match parse_menu_digit(body, 12) {
                Some(month) => {
                    let prompt =
                        strings::month_ok_ask_qty(lang, MONTH_NAMES[month - 1]);
                    state.sessions.set_session(
                        phone,
                        ChatStep::Quantity {
                            crop,
                            month: month as u32,
                        },
                    );
                    prompt
                }
                None => strings::invalid_month(lang).to_string(),
            }
        }

        ChatStep::Quantity { crop, month } => {
            if body == "*" {
                let prompt = strings::crop_ok_ask_month(lang, &crop);
                state.sessions.set_session(phone, ChatStep::Month { crop });
                return prompt;
            }
            let Some(quantity_kg) = parse_quantity(body) else {
                return strings::invalid_qty(lang).to_string();
            };
            let Some(user) = state.sessions.user(phone) else {
                state.sessions.clear_session(phone);
                return strings::welcome_register(lang).to_string();
            };
            state.sessions.clear_session(phone);
            run_prediction(state, lang, &user, &crop, month, quantity_kg)
        }
    }
}

fn register(state: &ApiState, phone: &str, lang: Lang, pincode: &str) -> String {
    match resolve_postal_code(&state.reference.postal, pincode) {
        PostalResolution::InvalidFormat | PostalResolution::NotFound => {
            strings::bad_pincode(lang).to_string()
        }
        PostalResolution::Found { district, state: st } => {
            let canonical = normalize_district(&district, Vocabulary::Centroid);
            if state
                .reference
                .centroids
                .lookup(&canonical, Some(&st))
                .is_none()
            {
                return strings::district_unsupported(lang, &district);
            }
            let is_update = state.sessions.register(
                phone,
                Registration {
                    pincode: pincode.to_string(),
                    district: canonical.clone(),
                    state: st.clone(),
                },
            );
            info!("SMS registration: {canonical}, {st} (update={is_update})");
            // Reply already shows the crop menu, so make it live.
            state.sessions.set_session(phone, ChatStep::Crop);
            strings::registered(lang, is_update, &canonical, &st)
        }
    }
}

fn run_prediction(
    state: &ApiState,
    lang: Lang,
    user: &Registration,
    crop: &str,
    month: u32,
    quantity_kg: f64,
) -> String {
    let month_name = MONTH_NAMES[(month - 1) as usize];
    let results = recommend(
        &state.reference,
        &state.model,
        &RecommendRequest {
            commodity: crop.to_string(),
            quantity_kg,
            origin_district: user.district.clone(),
            origin_state: user.state.clone(),
            target_month: month,
            target_year: chrono::Utc::now().year(),
            max_distance_km: SMS_MAX_DISTANCE_KM,
            top_n: SMS_TOP_N,
        },
    );

    if results.is_empty() {
        return strings::no_results(lang, crop, &user.district, month_name);
    }

    let mut msg = strings::result_header(lang, crop, month_name, quantity_kg, &user.district);
    for (i, r) in results.iter().take(SMS_RESULTS_SHOWN).enumerate() {
        msg.push_str(&strings::result_item(
            lang,
            i + 1,
            &r.market,
            r.distance_km,
            r.predicted_price,
            r.net_profit,
        ));
    }
    msg.push_str(strings::result_footer(lang));
    msg
}

/// "3" → Some(3) when within 1..=max.
fn parse_menu_digit(body: &str, max: usize) -> Option<usize> {
    body.parse::<usize>().ok().filter(|n| (1..=max).contains(n))
}

/// Quantity menu digit → representative kg for the bracket.
fn parse_quantity(body: &str) -> Option<f64> {
    match body {
        "1" => Some(250.0),
        "2" => Some(750.0),
        "3" => Some(2500.0),
        "4" => Some(6000.0),
        _ => None,
    }
}
