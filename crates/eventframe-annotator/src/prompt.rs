//! Oracle prompt for batch sentence labeling

use crate::error::AnnotatorError;

/// Builds the labeling prompt for one batch
pub struct PromptBuilder<'a> {
    texts: &'a [&'a str],
}

impl<'a> PromptBuilder<'a> {
    /// Create a prompt builder for a batch of texts
    pub fn new(texts: &'a [&'a str]) -> Self {
        Self { texts }
    }

    /// Build the complete labeling prompt
    ///
    /// The batch is appended as a single-line JSON array so the oracle sees
    /// the exact strings it must echo back.
    pub fn build(&self) -> Result<String, AnnotatorError> {
        let mut prompt = String::new();

        prompt.push_str(LABELING_INSTRUCTIONS);
        prompt.push_str("\n\n");
        prompt.push_str(TAXONOMY);
        prompt.push_str("\n\n");
        prompt.push_str(OUTPUT_FORMAT);
        prompt.push_str("\n\n");

        prompt.push_str(&format!("Lista zdań do analizy ({}):\n", self.texts.len()));
        prompt.push_str(&serde_json::to_string(self.texts)?);
        prompt.push('\n');

        Ok(prompt)
    }
}

/// JSON schema of the expected oracle response
pub const RESPONSE_SCHEMA: &str = r#"{
  "type": "object",
  "properties": {
    "results": {
      "type": "array",
      "items": {
        "type": "object",
        "properties": {
          "text": { "type": "string" },
          "label": {
            "type": "string",
            "enum": ["PRZESTEPSTWO", "KATASTROFA", "WYPADEK", "BIZNES", "POLITYKA", "BRAK_ZDARZENIA"]
          }
        },
        "required": ["text", "label"]
      }
    }
  },
  "required": ["results"]
}"#;

const LABELING_INSTRUCTIONS: &str = r#"Analizujesz nagłówki prasowe pod kątem zdarzeń (event extraction).
Dla każdego zdania ustal, czy opisuje konkretne zdarzenie fizyczne, które już nastąpiło lub właśnie trwa,
i przypisz mu DOKŁADNIE JEDNĄ etykietę.

Zasady:
- Opinie, prognozy, plany, zapowiedzi i metafory to BRAK_ZDARZENIA.
- Szukaj układu: [SPRAWCA] -> [CZYNNOŚĆ] -> [OBIEKT].
- Czytaj dosłownie: "Gospodarka tonie" to metafora, "Prom tonie" to zdarzenie."#;

const TAXONOMY: &str = r#"Etykiety i typowe czasowniki:
1. PRZESTEPSTWO - naruszenie prawa i działania policji: aresztować, zatrzymać, pobić, ukraść, zabić
2. KATASTROFA - zniszczenia na dużą skalę lub ofiary: wybuchnąć, spłonąć, zawalić się, powódź
3. WYPADEK - lokalne zdarzenia komunikacyjne i jednostkowe: kolizja, potrącić, dachować
4. BIZNES - konkretne działania firm: przejąć spółkę, fuzja, zbankrutować
5. POLITYKA - działania władzy i państw: uchwalić ustawę, zdymisjonować, wygrać wybory
6. BRAK_ZDARZENIA - wszystko inne: opinie, sondaże, zapowiedzi, sport, pogoda"#;

const OUTPUT_FORMAT: &str = r#"Zwróć WYŁĄCZNIE czysty JSON, bez bloków markdown i komentarzy:
{
  "results": [
    { "text": "zdanie w oryginalnym brzmieniu", "label": "NAZWA_ETYKIETY" }
  ]
}
Zachowaj kolejność i liczbę zdań z listy wejściowej."#;

#[cfg(test)]
mod tests {
    use super::*;
    use eventframe_domain::Label;

    #[test]
    fn test_prompt_ends_with_batch_array() {
        let texts = ["Złodziej ukradł rower.", "Jutro będzie padać."];
        let prompt = PromptBuilder::new(&texts).build().unwrap();

        let last = prompt.trim_end().lines().last().unwrap();
        let parsed: Vec<String> = serde_json::from_str(last).unwrap();
        assert_eq!(parsed, texts);
        assert!(prompt.contains("(2)"));
    }

    #[test]
    fn test_prompt_keeps_non_ascii() {
        let texts = ["Żółta łódź zatonęła."];
        let prompt = PromptBuilder::new(&texts).build().unwrap();
        assert!(prompt.contains("Żółta łódź"));
    }

    #[test]
    fn test_prompt_includes_taxonomy() {
        let prompt = PromptBuilder::new(&[]).build().unwrap();
        for label in Label::CLASSES {
            let listed = prompt
                .split(|c: char| !c.is_alphanumeric() && c != '_')
                .any(|word| Label::parse(word) == Some(label));
            assert!(listed, "{} missing from prompt", label);
        }
        assert!(prompt.contains("\"results\""));
    }

    #[test]
    fn test_schema_is_json_and_covers_classes() {
        let schema: serde_json::Value = serde_json::from_str(RESPONSE_SCHEMA).unwrap();
        let labels = schema["properties"]["results"]["items"]["properties"]["label"]["enum"]
            .as_array()
            .unwrap();
        assert_eq!(labels.len(), Label::CLASSES.len());
        for name in labels {
            assert!(Label::parse(name.as_str().unwrap()).is_some());
        }
    }
}
