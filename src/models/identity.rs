use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{BadRequestCause, IdentityError, IdentityResult};

/// Error fields every identity API response may carry. A missing `errcode`
/// means success.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadBase {
    #[serde(default)]
    pub errcode: i64,
    #[serde(default)]
    pub errmsg: String,
}

impl PayloadBase {
    pub fn is_success(&self) -> bool {
        self.errcode == 0
    }

    pub fn into_result(self) -> Result<(), BadRequestCause> {
        if self.is_success() {
            return Ok(());
        }

        Err(BadRequestCause::Remote {
            errcode: self.errcode,
            errmsg: self.errmsg,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrantType {
    ClientCredential,
    AuthorizationCode,
}

impl fmt::Display for GrantType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrantType::ClientCredential => write!(f, "client_credential"),
            GrantType::AuthorizationCode => write!(f, "authorization_code"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    pub expires_in: u64,
    #[serde(flatten)]
    pub base: PayloadBase,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct OpenIdSession {
    pub openid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unionid: Option<String>,
    pub session_key: String,
    #[serde(flatten)]
    pub base: PayloadBase,
}

impl fmt::Debug for OpenIdSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenIdSession")
            .field("openid", &self.openid)
            .field("unionid", &self.unionid)
            .field("session_key", &"<redacted>")
            .field("base", &self.base)
            .finish()
    }
}

#[derive(Debug, Serialize)]
pub struct PhoneNumberRequest<'a> {
    pub code: &'a str,
    pub openid: &'a str,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhoneNumberResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_info: Option<PhoneInfo>,
    #[serde(flatten)]
    pub base: PayloadBase,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneInfo {
    /// Number with country prefix when outside mainland China.
    #[serde(rename = "phoneNumber")]
    pub phone_number: String,
    #[serde(rename = "purePhoneNumber")]
    pub pure_phone_number: String,
    #[serde(rename = "countryCode")]
    pub country_code: String,
    pub watermark: Watermark,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Watermark {
    pub timestamp: i64,
    pub appid: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyInfo {
    pub encrypt_key: String,
    pub version: i64,
    pub expire_in: i64,
    pub iv: String,
    pub create_time: i64,
}

/// User encryption key material as returned by the platform. The key blobs
/// are still encrypted; see [`EncryptedProfile::decrypt`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncryptedProfile {
    #[serde(default)]
    pub key_info_list: Vec<KeyInfo>,
    #[serde(flatten)]
    pub base: PayloadBase,
}

impl EncryptedProfile {
    pub fn first_key_info(&self) -> IdentityResult<&KeyInfo> {
        self.key_info_list
            .first()
            .ok_or(IdentityError::EmptyResult("key_info_list"))
    }

    // TODO: decrypt with the session key once the platform's key derivation for user-encrypt-key is confirmed
    pub fn decrypt(&self) -> IdentityResult<Vec<u8>> {
        Err(IdentityError::NotImplemented("encrypted profile decryption"))
    }
}
