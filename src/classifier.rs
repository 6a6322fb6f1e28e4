use regex::Regex;

const IMAGE_KEYWORDS: &[&str] = &[
    "imagen",
    "imagen de",
    "genera una imagen",
    "genera imagen",
    "foto",
    "fotografía",
    "dibujar",
    "dibujo",
    "ilustración",
    "haz una imagen",
    "quiero una imagen",
    "crea una imagen",
    "crear imagen",
    "pintar",
    "pintura",
    "render",
    "illustration",
    "draw",
    "generate image",
    "make an image",
    "picture of",
    "photo of",
];

lazy_static! {
    static ref EXPLANATION: Regex =
        Regex::new(r"\b(explica|describe|qué es|quién es|cómo|por qué)\b").unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Image,
    Text,
}

pub fn classify(text: Option<&str>) -> Intent {
    let txt = match text {
        Some(t) if !t.is_empty() => t.to_lowercase(),
        _ => return Intent::Text,
    };
    if IMAGE_KEYWORDS.iter().any(|kw| txt.contains(kw)) {
        return Intent::Image;
    }
    // explanations are always text, image keywords already took priority
    if EXPLANATION.is_match(&txt) {
        return Intent::Text;
    }
    Intent::Text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn imagen_in_any_case_is_image() {
        for text in ["imagen", "IMAGEN de un perro", "Genera una Imagen de un gato"] {
            assert_eq!(classify(Some(text)), Intent::Image, "{text}");
        }
    }

    #[test]
    fn english_phrases_are_image() {
        assert_eq!(classify(Some("Draw me a dragon")), Intent::Image);
        assert_eq!(classify(Some("a picture of the moon")), Intent::Image);
        assert_eq!(classify(Some("Photo of Lisbon at night")), Intent::Image);
    }

    #[test]
    fn explanations_are_text() {
        assert_eq!(classify(Some("¿qué es un agujero negro?")), Intent::Text);
        assert_eq!(classify(Some("describe the french revolution")), Intent::Text);
        assert_eq!(classify(Some("Explica cómo funciona un motor")), Intent::Text);
    }

    #[test]
    fn keyword_wins_over_explanation() {
        assert_eq!(classify(Some("describe una foto de la playa")), Intent::Image);
        // substring match: "fotosíntesis" contains "foto"
        assert_eq!(classify(Some("¿Qué es la fotosíntesis?")), Intent::Image);
    }

    #[test]
    fn plain_chat_defaults_to_text() {
        assert_eq!(classify(Some("hola, ¿cómo estás?")), Intent::Text);
        assert_eq!(classify(Some("tell me a joke")), Intent::Text);
    }

    #[test]
    fn empty_or_absent_is_text() {
        assert_eq!(classify(Some("")), Intent::Text);
        assert_eq!(classify(None), Intent::Text);
    }
}
