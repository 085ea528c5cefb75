//! Unit tests for deployment-variant profiles.

use rstest::rstest;

use super::*;

#[test]
fn managed_treats_entry_return_as_unexpected() {
    let profile = VariantProfile::managed();
    assert_eq!(profile.on_return(), 1);
    assert_eq!(profile.on_failure(), 1);
    assert_eq!(profile.path_diagnostic(), DiagnosticLevel::Debug);
}

#[test]
fn oneshot_treats_entry_return_as_clean() {
    let profile = VariantProfile::oneshot();
    assert_eq!(profile.on_return(), 0);
    assert_eq!(profile.on_failure(), 1);
    assert_eq!(profile.path_diagnostic(), DiagnosticLevel::Info);
}

#[rstest]
#[case::lowercase("managed", VariantKind::Managed)]
#[case::capitalised("Managed", VariantKind::Managed)]
#[case::oneshot("oneshot", VariantKind::Oneshot)]
fn variant_kind_parses_case_insensitively(#[case] text: &str, #[case] expected: VariantKind) {
    let parsed: VariantKind = text.parse().expect("known variant");
    assert_eq!(parsed, expected);
}

#[test]
fn variant_kind_rejects_unknown_names() {
    assert!("sidecar".parse::<VariantKind>().is_err());
}

#[rstest]
#[case(VariantKind::Managed, VariantProfile::managed())]
#[case(VariantKind::Oneshot, VariantProfile::oneshot())]
fn variant_kind_maps_to_its_profile(#[case] kind: VariantKind, #[case] expected: VariantProfile) {
    assert_eq!(kind.profile(), expected);
}
