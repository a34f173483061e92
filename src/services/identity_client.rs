use reqwest::{header::CONTENT_TYPE, Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::{
    config::WechatConfig,
    errors::{BadRequestCause, IdentityError, IdentityResult},
    models::identity::{
        AccessToken, EncryptedProfile, GrantType, OpenIdSession, PayloadBase, PhoneInfo, PhoneNumberRequest,
        PhoneNumberResponse,
    },
    services::signer::Signer,
};

const TOKEN_PATH: &str = "/cgi-bin/token";
const CODE_TO_SESSION_PATH: &str = "/sns/jscode2session";
const PHONE_NUMBER_PATH: &str = "/wxa/business/getuserphonenumber";
const USER_ENCRYPT_KEY_PATH: &str = "/wxa/getuserencryptkey";
const CHECK_SESSION_PATH: &str = "/wxa/checksession";

const SIG_METHOD: &str = "hmac_sha256";

/// Client for the mini-program identity API.
///
/// Every operation is a single request: no token caching and no retries.
/// Any failure of the remote call comes back as
/// [`ErrorKind::BadRequest`](crate::errors::ErrorKind::BadRequest).
#[derive(Debug, Clone)]
pub struct IdentityClient {
    client: Client,
    config: WechatConfig,
}

fn encode(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

fn decode<T: DeserializeOwned>(endpoint: &'static str, bytes: &[u8]) -> IdentityResult<T> {
    serde_json::from_slice(bytes).map_err(|e| {
        warn!(endpoint, error = %e, "Identity API returned an undecodable body");
        IdentityError::from(e)
    })
}

impl IdentityClient {
    pub fn new(config: WechatConfig) -> IdentityResult<Self> {
        let client = Client::builder()
            .timeout(config.get_request_timeout())
            .build()
            .map_err(IdentityError::Client)?;

        Ok(Self { client, config })
    }

    pub fn app_id(&self) -> &str {
        &self.config.app_id
    }

    fn base_url(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }

    pub(crate) fn access_token_url(&self) -> String {
        format!(
            "{}{}?grant_type={}&appid={}&secret={}",
            self.base_url(),
            TOKEN_PATH,
            GrantType::ClientCredential,
            encode(&self.config.app_id),
            encode(&self.config.app_secret)
        )
    }

    pub(crate) fn open_id_url(&self, code: &str) -> String {
        format!(
            "{}{}?appid={}&secret={}&js_code={}&grant_type={}",
            self.base_url(),
            CODE_TO_SESSION_PATH,
            encode(&self.config.app_id),
            encode(&self.config.app_secret),
            encode(code),
            GrantType::AuthorizationCode
        )
    }

    pub(crate) fn telephone_url(&self, access_token: &str) -> String {
        format!(
            "{}{}?access_token={}",
            self.base_url(),
            PHONE_NUMBER_PATH,
            encode(access_token)
        )
    }

    /// Signed endpoints take `access_token==<token>`; the doubled `=` is what
    /// the platform has been observed to accept and is kept as is.
    pub(crate) fn signed_url(&self, path: &str, openid: &str, access_token: &str, signature: &str) -> String {
        format!(
            "{}{}?access_token=={}&openid={}&signature={}&sig_method={}",
            self.base_url(),
            path,
            encode(access_token),
            encode(openid),
            encode(signature),
            SIG_METHOD
        )
    }

    /// Sends the request and decodes the body. The status is checked before
    /// the body is read, and the error envelope before the typed payload, so
    /// a non-zero `errcode` is reported as such rather than as missing fields.
    async fn execute<T>(&self, endpoint: &'static str, request: RequestBuilder) -> IdentityResult<T>
    where
        T: DeserializeOwned,
    {
        debug!(endpoint, "Sending identity API request");

        let response = request
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| {
                warn!(endpoint, error = %e, "Identity API request failed");
                IdentityError::from(e)
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    warn!(endpoint, error = %e, "Failed to read body of non-OK response");
                    String::new()
                }
            };
            warn!(endpoint, status = status.as_u16(), "Identity API returned non-OK status");
            return Err(BadRequestCause::Status { status, body }.into());
        }

        let bytes = response.bytes().await?;
        let base: PayloadBase = decode(endpoint, &bytes)?;
        if !base.is_success() {
            warn!(endpoint, errcode = base.errcode, errmsg = %base.errmsg, "Identity API returned an error code");
            base.into_result()?;
        }

        decode(endpoint, &bytes)
    }

    pub async fn obtain_access_token(&self) -> IdentityResult<AccessToken> {
        let request = self.client.get(self.access_token_url());
        let token: AccessToken = self.execute(TOKEN_PATH, request).await?;

        info!(expires_in = token.expires_in, "Obtained access token");
        Ok(token)
    }

    pub async fn obtain_open_id(&self, code: &str) -> IdentityResult<OpenIdSession> {
        let request = self.client.get(self.open_id_url(code));
        let session: OpenIdSession = self.execute(CODE_TO_SESSION_PATH, request).await?;

        info!(openid = %session.openid, has_unionid = session.unionid.is_some(), "Exchanged login code");
        Ok(session)
    }

    pub async fn obtain_telephone(&self, access_token: &str, code: &str, openid: &str) -> IdentityResult<PhoneInfo> {
        // Serialized by hand: `execute` sets the content type for every request
        let body = serde_json::to_vec(&PhoneNumberRequest { code, openid })?;
        let request = self.client.post(self.telephone_url(access_token)).body(body);
        let response: PhoneNumberResponse = self.execute(PHONE_NUMBER_PATH, request).await?;

        let phone_info = response.phone_info.ok_or(IdentityError::EmptyResult("phone_info"))?;
        info!(openid, country_code = %phone_info.country_code, "Fetched phone number");
        Ok(phone_info)
    }

    /// Fetches the user's encrypted key material. The returned profile always
    /// has at least one key-info entry.
    pub async fn fetch_user(
        &self,
        openid: &str,
        access_token: &str,
        session_key: &str,
    ) -> IdentityResult<EncryptedProfile> {
        let signature = Signer::sign_session_key(session_key);
        let request = self
            .client
            .get(self.signed_url(USER_ENCRYPT_KEY_PATH, openid, access_token, &signature));
        let profile: EncryptedProfile = self.execute(USER_ENCRYPT_KEY_PATH, request).await?;

        let first = profile.first_key_info()?;
        info!(
            openid,
            key_count = profile.key_info_list.len(),
            version = first.version,
            "Fetched user encrypt key"
        );
        Ok(profile)
    }

    #[deprecated(note = "the session check endpoint is no longer used by login flows")]
    pub async fn verify_session(
        &self,
        openid: &str,
        access_token: &str,
        session_key: &str,
    ) -> IdentityResult<PayloadBase> {
        let signature = Signer::sign_session_key(session_key);
        let request = self
            .client
            .get(self.signed_url(CHECK_SESSION_PATH, openid, access_token, &signature));
        let payload: PayloadBase = self.execute(CHECK_SESSION_PATH, request).await?;

        info!(openid, "Session is valid");
        Ok(payload)
    }
}
