use failure::Error;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json;

lazy_static! {
    static ref HTTP_CLIENT: Client = Client::new();
}

/// Username and API token pair used for HTTP basic authentication.
pub struct BasicCredentials {
    pub username: String,
    pub api_token: String,
}

/// Decorates an outgoing request with basic-auth credentials before it is
/// sent. No control-flow effect of its own.
pub fn authenticate(request: RequestBuilder, credentials: &BasicCredentials) -> RequestBuilder {
    request.basic_auth(&credentials.username, Some(&credentials.api_token))
}

pub fn get_url_response<T>(url_string: &str, credentials: &BasicCredentials) -> Result<T, Error>
where
    T: DeserializeOwned,
{
    if let Ok(url) = Url::parse(url_string) {
        let response = authenticate(HTTP_CLIENT.get(url), credentials).send()?;

        match response.status() {
            StatusCode::OK => {
                let body_string = response.text()?;
                let deser = serde_json::from_str::<T>(body_string.as_str())?;
                Ok(deser)
            }
            other_code => Err(format_err!(
                "HTTP call to {} failed with code: {}",
                url_string,
                other_code
            )),
        }
    } else {
        Err(format_err!("Unable to parse url: {}", url_string))
    }
}

/// POSTs with the given query parameters and discards the response body.
/// Any 2xx code counts as accepted.
pub fn post_url_response<P>(
    url_string: &str,
    params: &P,
    credentials: &BasicCredentials,
) -> Result<(), Error>
where
    P: Serialize + ?Sized,
{
    if let Ok(url) = Url::parse(url_string) {
        let response = authenticate(HTTP_CLIENT.post(url).query(params), credentials).send()?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(format_err!(
                "HTTP POST to {} failed with code: {}",
                url_string,
                status
            ))
        }
    } else {
        Err(format_err!("Unable to parse url: {}", url_string))
    }
}
