use backr::config::jwt::JwtConfig;
use backr::utils::jwt::{Claims, create_access_token, verify_token};
use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header, encode};

const ADDRESS: &str = "0xabcdef0123456789abcdef0123456789abcdef01";

fn get_test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test_secret_key_for_testing_purposes".to_string(),
        access_token_expiry: 3600,
    }
}

#[test]
fn test_create_and_verify_roundtrip() {
    let jwt_config = get_test_jwt_config();

    let token = create_access_token(ADDRESS, &jwt_config).unwrap();
    assert!(!token.is_empty());

    let claims = verify_token(&token, &jwt_config).unwrap();
    assert_eq!(claims.address, ADDRESS);
    assert!(claims.exp > claims.iat);
}

#[test]
fn test_verify_rejects_wrong_secret() {
    let jwt_config = get_test_jwt_config();
    let token = create_access_token(ADDRESS, &jwt_config).unwrap();

    let other = JwtConfig {
        secret: "a_completely_different_secret".to_string(),
        access_token_expiry: 3600,
    };

    assert!(verify_token(&token, &other).is_err());
}

#[test]
fn test_verify_rejects_expired_token() {
    let jwt_config = get_test_jwt_config();
    let now = Utc::now().timestamp() as usize;

    let claims = Claims {
        address: ADDRESS.to_string(),
        exp: now - 120,
        iat: now - 3720,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .unwrap();

    assert!(verify_token(&token, &jwt_config).is_err());
}

// A correctly signed token whose claims carry a non-address subject is
// treated as no identity at all.
#[test]
fn test_verify_rejects_invalid_address_claim() {
    let jwt_config = get_test_jwt_config();
    let now = Utc::now().timestamp() as usize;

    for bad_address in ["", "alice", "0x1234", "deadbeef"] {
        let claims = Claims {
            address: bad_address.to_string(),
            exp: now + 3600,
            iat: now,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
        )
        .unwrap();

        assert!(verify_token(&token, &jwt_config).is_err(), "{}", bad_address);
    }
}

#[test]
fn test_verify_rejects_garbage() {
    let jwt_config = get_test_jwt_config();

    assert!(verify_token("", &jwt_config).is_err());
    assert!(verify_token("not-a-jwt", &jwt_config).is_err());
    assert!(verify_token("a.b", &jwt_config).is_err());
    assert!(verify_token("a.b.c", &jwt_config).is_err());
}
