use crate::error::ParleyError;
use actix_web::HttpRequest;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use parley_domain::{User, ID};
use parley_infra::ParleyContext;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Claims {
    exp: usize,  // Expiration time (as UTC timestamp)
    iat: usize,  // Issued at (as UTC timestamp)
    user_id: ID, // Subject (whom token refers to)
}

fn parse_authtoken_header(token_header_value: &str) -> String {
    token_header_value
        .replace("Bearer", "")
        .replace("bearer", "")
        .trim()
        .to_string()
}

fn decode_token(api_secret: &str, token: &str) -> anyhow::Result<Claims> {
    let decoding_key = DecodingKey::from_secret(api_secret.as_bytes());
    let claims =
        decode::<Claims>(token, &decoding_key, &Validation::new(Algorithm::HS256))?.claims;

    Ok(claims)
}

pub async fn protect_route(req: &HttpRequest, ctx: &ParleyContext) -> Result<User, ParleyError> {
    let token = match req.headers().get("authorization") {
        Some(token) => match token.to_str() {
            Ok(token) => parse_authtoken_header(token),
            Err(_) => {
                return Err(ParleyError::Unauthorized(
                    "Malformed authorization header provided".into(),
                ))
            }
        },
        None => {
            return Err(ParleyError::Unauthorized(
                "Unable to find authorization header".into(),
            ))
        }
    };

    let claims = decode_token(&ctx.config.api_secret, &token)
        .map_err(|_| ParleyError::Unauthorized("Invalid credentials provided".into()))?;

    match ctx.repos.users.find(&claims.user_id).await {
        Some(user) => Ok(user),
        None => Err(ParleyError::Unauthorized(
            "Unable to find user from credentials".into(),
        )),
    }
}
