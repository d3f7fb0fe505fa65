//! Tests for neighborhood extraction.

use painel_transform::extract_neighborhood;
use proptest::prelude::*;

#[test]
fn dot_rule_extracts_trimmed_place() {
    assert_eq!(
        extract_neighborhood(Some("Av. Ipiranga, 100. Some Place , Porto Alegre - RS")),
        "Some Place"
    );
}

#[test]
fn hyphen_rule_extracts_neighborhood() {
    assert_eq!(
        extract_neighborhood(Some("Rua X, 123 - Centro, Porto Alegre - RS")),
        "Centro"
    );
    assert_eq!(
        extract_neighborhood(Some("Rua Y, 45 - Cidade Baixa, Porto Alegre - RS, 90000-000")),
        "Cidade Baixa"
    );
}

#[test]
fn other_cities_are_unknown() {
    assert_eq!(
        extract_neighborhood(Some("Rua X, 123 - Centro, Canoas - RS")),
        "Unknown"
    );
    assert_eq!(extract_neighborhood(Some("Rua sem bairro")), "Unknown");
}

#[test]
fn missing_or_blank_address_is_unknown() {
    assert_eq!(extract_neighborhood(None), "Unknown");
    assert_eq!(extract_neighborhood(Some("")), "Unknown");
    assert_eq!(extract_neighborhood(Some("   ")), "Unknown");
}

proptest! {
    #[test]
    fn dot_fragment_is_captured(place in "[A-Za-z][A-Za-z ]{0,20}[A-Za-z]") {
        let address = format!("Rua A, 10. {place}, Porto Alegre - RS");
        prop_assert_eq!(extract_neighborhood(Some(&address)), place);
    }

    #[test]
    fn hyphen_fragment_is_captured(place in "[A-Za-z][A-Za-z ]{0,20}[A-Za-z]") {
        let address = format!("Rua A, 10 - {place}, Porto Alegre - RS");
        prop_assert_eq!(extract_neighborhood(Some(&address)), place);
    }

    #[test]
    fn never_empty_and_repeatable(address in ".{0,60}") {
        let first = extract_neighborhood(Some(&address));
        prop_assert!(!first.is_empty());
        prop_assert_eq!(extract_neighborhood(Some(&address)), first);
    }
}
