use cotizador_backend::config::jwt_conf::JwtConfig;
use cotizador_backend::util::jwt::{JwtTokenUtils, JwtTokenUtilsImpl};

#[test]
fn test_access_token_round_trip() {
    let jwt_utils = JwtTokenUtilsImpl::from_test_env();

    let token = jwt_utils
        .generate_access_token("agent-uid-1", "vendedor@inmobiliaria.com", "agent")
        .expect("Failed to generate token");

    let claims = jwt_utils
        .validate_access_token(&token)
        .expect("Failed to validate token");

    assert_eq!(claims.sub, "agent-uid-1");
    assert_eq!(claims.email, "vendedor@inmobiliaria.com");
    assert_eq!(claims.role, "agent");
    assert!(claims.exp > claims.iat);
}

#[test]
fn test_token_from_other_secret_is_rejected() {
    let issuer = JwtTokenUtilsImpl::new(JwtConfig {
        jwt_secret: "another-secret-key-that-is-long-enough!".to_string(),
        access_token_expiration: 15,
        jwt_issuer: None,
    });
    let verifier = JwtTokenUtilsImpl::from_test_env();

    let token = issuer
        .generate_access_token("agent-uid-1", "vendedor@inmobiliaria.com", "agent")
        .expect("Failed to generate token");

    assert!(verifier.validate_access_token(&token).is_err());
}

#[test]
fn test_garbage_token_is_rejected() {
    let jwt_utils = JwtTokenUtilsImpl::from_test_env();
    assert!(jwt_utils.validate_access_token("not-a-jwt").is_err());
}

#[test]
fn test_extract_token_from_header() {
    let jwt_utils = JwtTokenUtilsImpl::from_test_env();

    let token = jwt_utils
        .extract_token_from_header("Bearer abc.def.ghi")
        .expect("Failed to extract token");
    assert_eq!(token, "abc.def.ghi");

    assert!(jwt_utils.extract_token_from_header("abc.def.ghi").is_err());
    assert!(jwt_utils.extract_token_from_header("Bearer ").is_err());
    assert!(jwt_utils.extract_token_from_header("Basic abc").is_err());
}
