#![cfg(feature = "std")]

use std::path::Path;

use csv::ReaderBuilder;
use hl7_decode::{
    avec::{
        document::{Document, FieldMap},
        slice::{decode_document, messages},
    },
    sans::Value,
};

#[test]
fn decode_document_results() {
    const PATH: &str = "fixtures/oru-r01.hl7";
    let data = std::fs::read(PATH).unwrap();
    let mut document = Document::default();
    decode_document(&data, &mut document).unwrap();
    Validator::new(PATH).validate(&document);
}

#[test]
fn decode_document_results_unterminated() {
    const PATH: &str = "fixtures/oru-r01.hl7";
    let data = std::fs::read(PATH).unwrap();
    let data = data.strip_suffix(b"\r").unwrap();
    let mut document = Document::default();
    decode_document(data, &mut document).unwrap();
    Validator::new(PATH).validate(&document);
}

#[test]
fn decode_document_batch() {
    const PATH: &str = "fixtures/oru-r01.hl7";
    let data = std::fs::read(PATH).unwrap();
    let batch = [&data[..], &data[..]].concat();

    let mut count = 0;
    for message in messages(&batch) {
        let mut document = Document::default();
        decode_document(message, &mut document).unwrap();
        Validator::new(PATH).validate(&document);
        count += 1;
    }

    assert_eq!(count, 2);
}

/// Expected fields of a document, one row per field: segment name, occurrence,
/// field index and text.
struct Validator(Vec<Vec<String>>);

impl Validator {
    fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().with_extension("csv");

        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .has_headers(false)
            .from_path(path)
            .unwrap();

        let expected = reader
            .records()
            .map(|r| r.unwrap().iter().map(|f| f.to_string()).collect())
            .collect();

        Self(expected)
    }

    fn validate(mut self, document: &Document<'_>) {
        for (name, _) in document.iter() {
            for (occurrence, fields) in document.occurrences(name).iter().enumerate() {
                self.validate_fields(name, occurrence, fields);
            }
        }

        assert!(self.0.is_empty(), "missing fields: {:?}", self.0);
    }

    fn validate_fields(&mut self, name: &str, occurrence: usize, fields: &FieldMap<'_>) {
        for (index, value) in fields {
            let row = self.0.remove(0);
            let found = [
                name.to_string(),
                occurrence.to_string(),
                index.to_string(),
                render(value),
            ];
            assert_eq!(row, found);
        }
    }
}

/// Rejoin a value with the conventional delimiters. Subcomponents are not
/// present in the fixtures.
fn render(value: &Value<'_>) -> String {
    match value {
        Value::Scalar(s) => s.to_string(),
        Value::Repetition(items) => items.iter().map(render).collect::<Vec<_>>().join("~"),
        Value::Component(parts) => parts.iter().map(render).collect::<Vec<_>>().join("^"),
    }
}
