use whatlang::{Lang, detect};

use crate::language::{
    classifier::{LanguageClassifier, to_label},
    errors::ClassifierError,
};

/// Trigram-based fallback backend. Reports at most one label per text.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhatlangClassifier;

impl WhatlangClassifier {
    pub fn new() -> Self {
        Self
    }
}

impl LanguageClassifier for WhatlangClassifier {
    fn classify(&self, text: &str, k: usize) -> Result<Vec<(String, f32)>, ClassifierError> {
        if k == 0 {
            return Ok(Vec::new());
        }

        Ok(detect(text)
            .map(|info| vec![(to_label(lang_to_code(info.lang())), info.confidence() as f32)])
            .unwrap_or_default())
    }

    fn name(&self) -> &'static str {
        "whatlang"
    }

    fn label_count(&self) -> usize {
        Lang::all().len()
    }
}

fn lang_to_code(lang: Lang) -> &'static str {
    match lang {
        Lang::Eng => "en",
        Lang::Rus => "ru",
        Lang::Cmn => "zh",
        Lang::Spa => "es",
        Lang::Fra => "fr",
        Lang::Deu => "de",
        Lang::Jpn => "ja",
        Lang::Kor => "ko",
        Lang::Por => "pt",
        Lang::Ita => "it",
        Lang::Nld => "nl",
        Lang::Pol => "pl",
        Lang::Tur => "tr",
        Lang::Swe => "sv",
        Lang::Dan => "da",
        Lang::Fin => "fi",
        Lang::Heb => "he",
        Lang::Ara => "ar",
        Lang::Hin => "hi",
        Lang::Tha => "th",
        Lang::Vie => "vi",
        Lang::Epo => "eo",
        Lang::Ben => "bn",
        Lang::Ukr => "uk",
        Lang::Kat => "ka",
        Lang::Yid => "yi",
        Lang::Amh => "am",
        Lang::Jav => "jv",
        Lang::Nob => "no",
        Lang::Hun => "hu",
        Lang::Ces => "cs",
        Lang::Ell => "el",
        Lang::Bul => "bg",
        Lang::Bel => "be",
        Lang::Mar => "mr",
        Lang::Kan => "kn",
        Lang::Ron => "ro",
        Lang::Slv => "sl",
        Lang::Hrv => "hr",
        Lang::Srp => "sr",
        Lang::Mkd => "mk",
        Lang::Lit => "lt",
        Lang::Lav => "lv",
        Lang::Est => "et",
        Lang::Tam => "ta",
        Lang::Urd => "ur",
        Lang::Guj => "gu",
        Lang::Uzb => "uz",
        Lang::Pan => "pa",
        Lang::Aze => "az",
        Lang::Ind => "id",
        Lang::Tel => "te",
        Lang::Pes => "fa",
        Lang::Mal => "ml",
        Lang::Ori => "or",
        Lang::Mya => "my",
        Lang::Nep => "ne",
        Lang::Sin => "si",
        Lang::Khm => "km",
        Lang::Tuk => "tk",
        Lang::Afr => "af",
        Lang::Lat => "la",
        Lang::Slk => "sk",
        Lang::Cat => "ca",
        Lang::Tgl => "tl",
        // no two-letter code in the registry
        _ => lang.code(),
    }
}
