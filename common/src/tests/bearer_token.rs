use crate::BearerToken;

/// **VALUE**: Verifies the token never shows up in Debug output.
///
/// **WHY THIS MATTERS**: Flow state is logged with `{:?}` at debug level. A
/// leaked access token in a log file is a credential leak.
///
/// **BUG THIS CATCHES**: Would catch a derived Debug replacing the manual impl.
#[test]
fn given_bearer_token_when_debug_formatted_then_value_is_redacted() {
    // GIVEN: A token
    let token = BearerToken::new("tok123");

    // WHEN: Debug formatting
    let debug = format!("{:?}", token);

    // THEN: Value must not appear
    assert!(!debug.contains("tok123"), "Debug output leaked the token");
    assert!(debug.contains("REDACTED"));
}

/// **VALUE**: Verifies the Authorization value is `Bearer <token>` verbatim.
///
/// **WHY THIS MATTERS**: The post-creation call must carry exactly the token the
/// login returned. Any trimming or re-encoding breaks authentication.
///
/// **BUG THIS CATCHES**: Would catch a missing space, a lowercased scheme, or
/// a token that gets trimmed.
#[test]
fn given_bearer_token_when_converted_to_authorization_then_value_is_verbatim() {
    // GIVEN: A token with characters that must survive untouched
    let token = BearerToken::new("eyJ.a-b_c.d=");

    // WHEN: Consuming it into a header value
    let header = token.into_authorization();

    // THEN: Scheme plus exact token
    assert_eq!(header, "Bearer eyJ.a-b_c.d=");
}

#[test]
fn given_bearer_token_when_serialized_then_fails() {
    let token = BearerToken::new("tok123");

    let result = serde_json::to_string(&token);

    assert!(result.is_err(), "BearerToken must refuse serialization");
}

#[test]
fn given_empty_token_when_inspected_then_reports_empty() {
    let token = BearerToken::new(String::new());

    assert!(token.is_empty());
    assert_eq!(token.len(), 0);
    assert_eq!(token.as_str(), "");
}
