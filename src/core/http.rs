use std::time::Duration;

use reqwest::{
    header::{
        HeaderMap,
        HeaderValue,
        ACCEPT,
        USER_AGENT,
    },
    Client,
    Response,
};

use crate::core::{
    errors::TransportError,
    CoachError,
};

pub fn http_client(timeout: Duration) -> Result<Client, CoachError> {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static("sales-coach/0.1 (+reqwest)"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    let client = Client::builder()
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(5).min(timeout))
        .default_headers(headers)
        .build()?;
    Ok(client)
}

pub fn ensure_success(resp: Response) -> Result<Response, TransportError> {
    if !resp.status().is_success() {
        return Err(TransportError::Status {
            status: resp.status().as_u16(),
            url: resp.url().to_string(),
        });
    }
    Ok(resp)
}
