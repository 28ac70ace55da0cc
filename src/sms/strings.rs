//! All bot messages in all supported languages.
//! To add a language: extend `Lang`, then give every message a new arm.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lang {
    En,
    Hi,
    Ta,
}

impl Lang {
    /// User reply digit → language, as shown in the language menu.
    pub fn from_digit(digit: &str) -> Option<Self> {
        match digit {
            "1" => Some(Lang::En),
            "2" => Some(Lang::Hi),
            "3" => Some(Lang::Ta),
            _ => None,
        }
    }
}

pub const ALL_CROPS: [&str; 5] = ["Tomato", "Onion", "Potato", "Wheat", "Rice"];

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Crop display name in the user's language; unknown crops pass through.
pub fn crop_name(crop: &str, lang: Lang) -> &str {
    match (crop, lang) {
        (c, Lang::En) => c,
        ("Tomato", Lang::Hi) => "तमातर",
        ("Tomato", Lang::Ta) => "தக்காளி",
        ("Onion", Lang::Hi) => "प्याज",
        ("Onion", Lang::Ta) => "வெங்காயம்",
        ("Potato", Lang::Hi) => "आलू",
        ("Potato", Lang::Ta) => "உருளைக்கிழங்கு",
        ("Wheat", Lang::Hi) => "गेहूँ",
        ("Wheat", Lang::Ta) => "கோத்துமை",
        ("Rice", Lang::Hi) => "चावल",
        ("Rice", Lang::Ta) => "அரிசி",
        (c, _) => c,
    }
}

/// Numbered crop list in the user's language.
pub fn crop_menu(lang: Lang) -> String {
    ALL_CROPS
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{}. {}", i + 1, crop_name(c, lang)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// First message to a brand-new user, multilingual so everyone can read it.
pub fn lang_menu() -> &'static str {
    "Fasal-to-Faida\nSelect language / भाषा चुनें / மொழி தேர்வு:\n1. English\n2. हिन्दी\n3. தமிழ்"
}

pub fn lang_set(lang: Lang) -> String {
    let header = match lang {
        Lang::En => "Language set: English",
        Lang::Hi => "भाषा: हिन्दी",
        Lang::Ta => "மொழி: தமிழ்",
    };
    format!("{header}\n\n{}", register_prompt(lang))
}

pub fn lang_switched(lang: Lang) -> &'static str {
    match lang {
        Lang::En => "Language set to English.",
        Lang::Hi => "भाषा हिन्दी कर दी गई है।",
        Lang::Ta => "மொழி தமிழாக மாற்றப்பட்டது.",
    }
}

pub fn register_prompt(lang: Lang) -> &'static str {
    match lang {
        Lang::En => "Register your district:\nSend #PINCODE\nExample: #641001",
        Lang::Hi => "अपना जिला दर्ज करें:\n#पिनकोड भेजें\nउदाहरण: #641001",
        Lang::Ta => {
            "உங்கள் மாவட்டத்தை பதிவு செய்யுங்கள்:\n#பின்கோட் அனுப்புங்கள்\nஉதாரணம்: #641001"
        }
    }
}

pub fn welcome_register(lang: Lang) -> &'static str {
    match lang {
        Lang::En => {
            "Welcome to Fasal-to-Faida!\n\nRegister your district:\nSend #PINCODE\nExample: #641001\n\nSend HELP for info."
        }
        Lang::Hi => {
            "Fasal-to-Faida में आपका स्वागत है!\n\nअपना जिला दर्ज करें:\n#पिनकोड भेजें\nउदा: #641001"
        }
        Lang::Ta => {
            "Fasal-to-Faida-க்கு வருக!\n\nஉங்கள் மாவட்டத்தை பதிவு செய்யுங்கள்:\n#பின்கோட் அனுப்புங்கள்\nஉதா: #641001"
        }
    }
}

pub fn bad_pincode(lang: Lang) -> &'static str {
    match lang {
        Lang::En => "Invalid pincode.\nSend a valid 6-digit pincode.\nExample: #641001",
        Lang::Hi => "अमान्य पिनकोड।\n6 अंकों वाला पिनकोड भेजें।\nउदा: #641001",
        Lang::Ta => "தவறான பின்கோட்.\nசரியான 6 எண் பின்கோட் அனுப்புங்கள்.\nஉதா: #641001",
    }
}

/// District resolved but has no centroid even after normalization, so no
/// distances can be computed for it.
pub fn district_unsupported(lang: Lang, district: &str) -> String {
    match lang {
        Lang::En => format!(
            "Your district ({district}) is not yet supported.\nSend a nearby district's pincode."
        ),
        Lang::Hi => format!(
            "आपका जिला ({district}) अभी समर्थित नहीं है।\nपास के जिले का पिनकोड भेजें।"
        ),
        Lang::Ta => format!(
            "உங்கள் மாவட்டம் ({district}) இன்னும் ஆதரிக்கப்படவில்லை.\nஅருகிலுள்ள மாவட்டத்தின் பின்கோட் அனுப்புங்கள்."
        ),
    }
}

pub fn registered(lang: Lang, is_update: bool, district: &str, state: &str) -> String {
    let action = match (lang, is_update) {
        (Lang::En, false) => "Registered",
        (Lang::En, true) => "Updated",
        (Lang::Hi, false) => "पंजीकृत",
        (Lang::Hi, true) => "अपडेट हुआ",
        (Lang::Ta, false) => "பதிவு செய்யப்பட்டது",
        (Lang::Ta, true) => "மேம்படுத்தப்பட்டது",
    };
    let menu = crop_menu(lang);
    match lang {
        Lang::En => format!(
            "Fasal-to-Faida\n{action}!\nDistrict: {district}, {state}\n\nSelect crop:\n{menu}\n\nReply with number."
        ),
        Lang::Hi => format!(
            "Fasal-to-Faida\n{action}!\nजिला: {district}, {state}\n\nफसल चुनें:\n{menu}\n\nनंबर भेजें।"
        ),
        Lang::Ta => format!(
            "Fasal-to-Faida\n{action}!\nமாவட்டம்: {district}, {state}\n\nபயிர் தேர்வு செய்யுங்கள்:\n{menu}\n\nஎண் அனுப்புங்கள்."
        ),
    }
}

pub fn main_menu(lang: Lang, district: &str) -> String {
    let menu = crop_menu(lang);
    match lang {
        Lang::En => format!(
            "Fasal-to-Faida\nDistrict: {district}\n\nSelect crop:\n{menu}\n\nSend #PINCODE to change district."
        ),
        Lang::Hi => format!(
            "Fasal-to-Faida\nजिला: {district}\n\nफसल चुनें:\n{menu}\n\nजिला बदलने के लिए #पिनकोड भेजें।"
        ),
        Lang::Ta => format!(
            "Fasal-to-Faida\nமாவட்டம்: {district}\n\nபயிர் தேர்வு செய்யுங்கள்:\n{menu}\n\nமாவட்டத்தை மாற்ற #பின்கோட் அனுப்புங்கள்."
        ),
    }
}

pub fn crop_ok_ask_month(lang: Lang, crop: &str) -> String {
    let crop = crop_name(crop, lang);
    match lang {
        Lang::En => format!(
            "Crop: {crop} OK\n\nWhich month to sell?\nReply 1-12\n(1=Jan  6=Jun  12=Dec)\nBack: *"
        ),
        Lang::Hi => format!(
            "फसल: {crop} ठीक है\n\nकिस महीने बेचना है?\n1-12 नंबर भेजें\n(1=जन  6=जून  12=दिस)\nवापस: *"
        ),
        Lang::Ta => format!(
            "பயிர்: {crop} சரி\n\nஎந்த மாதத்தில் விற்க வேண்டும்?\n1-12 அனுப்புங்கள்\nமுந்தைய பக்கம்: *"
        ),
    }
}

pub fn month_ok_ask_qty(lang: Lang, month: &str) -> String {
    match lang {
        Lang::En => format!(
            "Month: {month} OK\n\nSelect quantity:\n1. Below 500 kg\n2. 500-1000 kg\n3. 1000-5000 kg\n4. Above 5000 kg\nBack: *"
        ),
        Lang::Hi => format!(
            "महीना: {month} ठीक है\n\nमात्रा चुनें:\n1. 500 किलो से कम\n2. 500-1000 किलो\n3. 1000-5000 किलो\n4. 5000 किलो से ज़्यादा\nवापस: *"
        ),
        Lang::Ta => format!(
            "மாதம்: {month} சரி\n\nஅளவு தேர்வு செய்யுங்கள்:\n1. 500 கிலோவிற்கு குறைவாக\n2. 500-1000 கிலோ\n3. 1000-5000 கிலோ\n4. 5000 கிலோவிற்கு மேல்\nமுந்தைய பக்கம்: *"
        ),
    }
}

pub fn invalid_crop(lang: Lang) -> String {
    let menu = crop_menu(lang);
    match lang {
        Lang::En => format!("Reply 1-5 for crop:\n{menu}"),
        Lang::Hi => format!("फसल के लिए 1-5 भेजें:\n{menu}"),
        Lang::Ta => format!("பயிருக்கு 1-5 அனுப்புங்கள்:\n{menu}"),
    }
}

pub fn invalid_month(lang: Lang) -> &'static str {
    match lang {
        Lang::En => "Reply with month 1-12.\nExample: 3 for March.",
        Lang::Hi => "महीना 1-12 भेजें।\nउदा: 3 मार्च के लिए।",
        Lang::Ta => "மாதத்திற்கு 1-12 அனுப்புங்கள்.\nஉதா: 3 மார்ச்.",
    }
}

pub fn invalid_qty(lang: Lang) -> &'static str {
    match lang {
        Lang::En => "Reply 1-4:\n1.<500kg   2.500-1000kg\n3.1-5 ton  4.>5000kg",
        Lang::Hi => "1-4 भेजें:\n1.<500कि  2.500-1000कि\n3.1-5टन  4.>5000कि",
        Lang::Ta => "1-4 அனுப்புங்கள்:\n1.<500கி  2.500-1000கி\n3.1-5டன்  4.>5000கி",
    }
}

pub fn no_results(lang: Lang, crop: &str, district: &str, month: &str) -> String {
    let crop = crop_name(crop, lang);
    match lang {
        Lang::En => format!(
            "No markets found for {crop}\nnear {district} in {month}.\n\nTry a different crop or month.\nMENU to start again."
        ),
        Lang::Hi => format!(
            "{district} के पास {crop} के लिए\n{month} में कोई मंडी नहीं मिली।\nदूसरी फसल या महीना आज़माएं।\nMENU भेजें।"
        ),
        Lang::Ta => format!(
            "{district} அருகில் {crop} க்கான\n{month} மாதத்தில் சந்தை கிடைக்கவில்லை.\nவேறு பயிர் அல்லது மாதம் முயற்சிக்கவும்.\nMENU அனுப்புங்கள்."
        ),
    }
}

pub fn result_header(lang: Lang, crop: &str, month: &str, qty_kg: f64, district: &str) -> String {
    let crop = crop_name(crop, lang);
    let qty = qty_kg as i64;
    match lang {
        Lang::En => format!("Top markets for {crop}\n({month}, {qty}kg from {district}):\n\n"),
        Lang::Hi => format!("{crop} के लिए शीर्ष मंडियां\n({month}, {qty}किलो, {district}):\n\n"),
        Lang::Ta => format!("{crop} க்கான சிறந்த சந்தைகள்\n({month}, {qty}கிலோ, {district}):\n\n"),
    }
}

pub fn result_item(
    lang: Lang,
    rank: usize,
    market: &str,
    distance_km: f64,
    price: f64,
    net_profit: f64,
) -> String {
    match lang {
        Lang::En => format!(
            "{rank}. {market} ({distance_km:.0}km)\n   Price: Rs.{price:.0}/qtl\n   Net profit: Rs.{net_profit:.0}\n\n"
        ),
        Lang::Hi => format!(
            "{rank}. {market} ({distance_km:.0}किमी)\n   भाव: रू{price:.0}/क्वि\n   शुद्ध लाभ: रू{net_profit:.0}\n\n"
        ),
        Lang::Ta => format!(
            "{rank}. {market} ({distance_km:.0}கிமீ)\n   விலை: ரூ.{price:.0}/க்வி\n   நிகர லாபம்: ரூ.{net_profit:.0}\n\n"
        ),
    }
}

pub fn result_footer(lang: Lang) -> &'static str {
    match lang {
        Lang::En => "MENU for new query\n#PINCODE to change district",
        Lang::Hi => "नई जानकारी के लिए MENU\nजिला बदलने के लिए #पिनकोड",
        Lang::Ta => "புதிய கேள்விக்கு MENU\nமாவட்டம் மாற்ற #பின்கோட்",
    }
}

pub fn help(lang: Lang) -> &'static str {
    match lang {
        Lang::En => {
            "Fasal-to-Faida Help\n\nRegister district:\n  #PINCODE (e.g. #641001)\n\nGet prediction:\n  Just text us\n\nGo back one step:\n  Send *\n\nChange language:\n  LANG 1 / LANG 2 / LANG 3\n\nRestart: MENU or HI"
        }
        Lang::Hi => {
            "Fasal-to-Faida सहायता\n\nजिला दर्ज करें:\n  #पिनकोड (जैसे #641001)\n\nभाषा बदलें:\n  LANG 1 / LANG 2 / LANG 3\n\nवापस: *  |  रिसेट: MENU"
        }
        Lang::Ta => {
            "Fasal-to-Faida உதவி\n\nமாவட்டம் பதிவு செய்ய:\n  #பின்கோட் (உதா: #641001)\n\nமொழி மாற்ற:\n  LANG 1 / LANG 2 / LANG 3\n\nமுந்தைய: *  |  மறுதொடக்கம்: MENU"
        }
    }
}

pub fn fallback(lang: Lang) -> &'static str {
    match lang {
        Lang::En => "Send MENU to start or HELP for info.",
        Lang::Hi => "शुरू करने के लिए MENU या जानकारी के लिए HELP भेजें।",
        Lang::Ta => "தொடங்க MENU அல்லது தகவலுக்கு HELP அனுப்புங்கள்.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crop_menu_is_numbered_in_every_language() {
        for lang in [Lang::En, Lang::Hi, Lang::Ta] {
            let menu = crop_menu(lang);
            assert_eq!(menu.lines().count(), ALL_CROPS.len());
            assert!(menu.starts_with("1. "));
        }
    }

    #[test]
    fn unknown_crop_name_passes_through() {
        assert_eq!(crop_name("Jackfruit", Lang::Hi), "Jackfruit");
    }

    #[test]
    fn lang_digits_map_in_menu_order() {
        assert_eq!(Lang::from_digit("1"), Some(Lang::En));
        assert_eq!(Lang::from_digit("2"), Some(Lang::Hi));
        assert_eq!(Lang::from_digit("3"), Some(Lang::Ta));
        assert_eq!(Lang::from_digit("4"), None);
    }
}
