use csv_sanitizer_core::sanitize::{CleaningResult, RejectionReason, Sanitizer};
use proptest::prelude::*;

fn non_blank_field() -> impl Strategy<Value = String> {
    "[A-Za-z0-9 ,\"]{1,8}".prop_filter("field must not be blank", |f| !f.trim().is_empty())
}

fn table(columns: usize) -> impl Strategy<Value = (Vec<String>, Vec<Vec<String>>)> {
    (
        proptest::collection::vec(non_blank_field(), columns),
        proptest::collection::vec(proptest::collection::vec(non_blank_field(), columns), 0..12),
    )
}

/// Either a valid row or one that a specific rule rejects.
#[derive(Debug, Clone)]
enum Row {
    Valid(Vec<String>),
    TooShort,
    AllBlank,
    OneBlank(Vec<String>),
}

fn row(columns: usize) -> impl Strategy<Value = Row> {
    prop_oneof![
        proptest::collection::vec("[a-z0-9]{1,5}", columns).prop_map(Row::Valid),
        Just(Row::TooShort),
        Just(Row::AllBlank),
        proptest::collection::vec("[a-z0-9]{1,5}", columns).prop_map(Row::OneBlank),
    ]
}

fn render(row: &Row, columns: usize) -> String {
    match row {
        Row::Valid(fields) => fields.join(","),
        Row::TooShort => "x".to_string(),
        Row::AllBlank => vec![" "; columns].join(","),
        Row::OneBlank(fields) => {
            let mut fields = fields.clone();
            fields[0] = String::new();
            fields.join(",")
        }
    }
}

proptest! {
    // One-column documents are excluded: a quoted single field looks like a
    // whole-row quoted line and is unwrapped on reparse.
    #[test]
    fn serialized_output_parses_back_to_the_same_table((header, rows) in (2usize..5).prop_flat_map(table)) {
        let original = CleaningResult { header, cleaned: rows, rejected: Vec::new() };
        let bytes = original.to_csv().unwrap();

        let reparsed = Sanitizer::default().sanitize(&bytes, "raw/roundtrip.csv").unwrap();

        prop_assert_eq!(reparsed.header, original.header);
        prop_assert_eq!(reparsed.cleaned, original.cleaned);
        prop_assert!(reparsed.rejected.is_empty());
    }

    #[test]
    fn outcomes_keep_input_order(rows in proptest::collection::vec(row(3), 0..20)) {
        let mut doc = String::from("a,b,c\n");
        for r in &rows {
            doc.push_str(&render(r, 3));
            doc.push('\n');
        }

        let result = Sanitizer::default().sanitize(doc.as_bytes(), "raw/order.csv").unwrap();

        let expected_cleaned: Vec<Vec<String>> = rows
            .iter()
            .filter_map(|r| match r {
                Row::Valid(fields) => Some(fields.clone()),
                _ => None,
            })
            .collect();
        let expected_reasons: Vec<RejectionReason> = rows
            .iter()
            .filter_map(|r| match r {
                Row::Valid(_) => None,
                Row::TooShort => Some(RejectionReason::WrongColumnCount),
                Row::AllBlank => Some(RejectionReason::EmptyRow),
                Row::OneBlank(_) => Some(RejectionReason::MissingFields),
            })
            .collect();
        let reasons: Vec<RejectionReason> = result.rejected.iter().map(|r| r.reason).collect();

        prop_assert_eq!(result.cleaned, expected_cleaned);
        prop_assert_eq!(reasons, expected_reasons);
    }

    #[test]
    fn sanitizing_is_deterministic(input in proptest::collection::vec(any::<u8>(), 0..256)) {
        let sanitizer = Sanitizer::default();
        let first = sanitizer.sanitize(&input, "raw/any.csv");
        let second = sanitizer.sanitize(&input, "raw/any.csv");

        match (first, second) {
            (Ok(a), Ok(b)) => {
                prop_assert_eq!(a.to_csv().unwrap(), b.to_csv().unwrap());
                prop_assert_eq!(a.error_log(), b.error_log());
            }
            (Err(a), Err(b)) => prop_assert_eq!(a.to_string(), b.to_string()),
            (a, b) => prop_assert!(false, "outcomes differ: {:?} vs {:?}", a, b),
        }
    }
}
