use crate::HttpStatusCode;

/// **VALUE**: Verifies status classification boundaries.
///
/// **WHY THIS MATTERS**: The probe and GraphQL client decide success purely from
/// the status code. An off-by-one here turns a 299 into a failure or a 300 into
/// a success.
///
/// **BUG THIS CATCHES**: Would catch inclusive/exclusive range mistakes.
#[test]
fn given_boundary_codes_when_classified_then_ranges_are_half_open() {
    assert!(HttpStatusCode(200).is_success());
    assert!(HttpStatusCode(299).is_success());
    assert!(!HttpStatusCode(300).is_success());
    assert!(!HttpStatusCode(199).is_success());
}

#[test]
fn given_status_code_when_displayed_then_prints_bare_number() {
    assert_eq!(HttpStatusCode::from(404).to_string(), "404");
}
