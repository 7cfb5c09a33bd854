use crate::GenerationError;
use eventsource_stream::Eventsource;
use futures::{stream::StreamExt, Stream};
use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue},
    Client,
};
use serde::{de::DeserializeOwned, Serialize};
use std::{collections::HashMap, pin::Pin};

/// Create a JSON request, parse the response.
/// Throws error on non OK status code.
pub async fn send_json<T: Serialize, R: DeserializeOwned>(
    client: &Client,
    url: &str,
    data: &T,
    headers: HeaderMap,
) -> Result<R, GenerationError> {
    tracing::debug!(url = %redact_key(url), "sending json request");
    let response = client.post(url).headers(headers).json(data).send().await?;
    if response.status().is_success() {
        Ok(response.json::<R>().await?)
    } else {
        Err(GenerationError::StatusCode(
            response.status(),
            response.text().await.unwrap_or_default(),
        ))
    }
}

/// Create a JSON request that returns an SSE stream.
/// Throws error on non OK status code.
async fn send_sse<T: Serialize>(
    client: &Client,
    url: &str,
    data: &T,
    headers: HeaderMap,
) -> Result<
    impl StreamExt<
        Item = Result<
            eventsource_stream::Event,
            eventsource_stream::EventStreamError<reqwest::Error>,
        >,
    >,
    GenerationError,
> {
    tracing::debug!(url = %redact_key(url), "opening sse stream");
    let response = client.post(url).headers(headers).json(data).send().await?;

    if response.status().is_success() {
        Ok(response.bytes_stream().eventsource())
    } else {
        Err(GenerationError::StatusCode(
            response.status(),
            response.text().await.unwrap_or_default(),
        ))
    }
}

/// Create a JSON request that returns a typed stream of parsed chunks.
/// Handles SSE parsing, JSON deserialization, and error conversion.
pub async fn send_sse_stream<T: Serialize + 'static, R: DeserializeOwned + Send + 'static>(
    client: &Client,
    url: &str,
    data: &T,
    headers: HeaderMap,
    provider: &'static str,
) -> Result<Pin<Box<dyn Stream<Item = Result<R, GenerationError>> + Send>>, GenerationError> {
    let mut sse_stream = send_sse(client, url, data, headers).await?;

    let stream = async_stream::try_stream! {
        while let Some(event) = sse_stream.next().await {
            match event {
                Ok(event) => {
                    if event.data.is_empty() {
                        continue;
                    }

                    let chunk: R = serde_json::from_str(&event.data)
                        .map_err(|e| {
                            GenerationError::Invariant(
                                provider,
                                format!("Failed to parse stream chunk: {e}")
                            )
                        })?;

                    yield chunk;
                }
                Err(e) => {
                    match e {
                        eventsource_stream::EventStreamError::Utf8(_) => {
                            Err(GenerationError::Invariant(
                                provider,
                                "Receive invalid UTF-8 sequence for stream data".to_string()
                            ))?;
                        }
                        eventsource_stream::EventStreamError::Parser(error) => {
                            Err(GenerationError::Invariant(
                                provider,
                                format!("Receive invalid EventStream data: {error}")
                            ))?;
                        },
                        eventsource_stream::EventStreamError::Transport(e) => {
                            Err(GenerationError::Transport(e))?;
                        }
                    }
                }
            }
        }
    };

    Ok(Box::pin(stream))
}

/// Build a header map from user supplied headers, rejecting invalid names
/// and values.
pub fn build_headers(
    provider: &'static str,
    headers: &HashMap<String, String>,
) -> Result<HeaderMap, GenerationError> {
    let mut map = HeaderMap::new();

    for (key, value) in headers {
        let header_name = HeaderName::from_bytes(key.as_bytes()).map_err(|error| {
            GenerationError::InvalidInput(format!("Invalid {provider} header name '{key}': {error}"))
        })?;
        let header_value = HeaderValue::from_str(value).map_err(|error| {
            GenerationError::InvalidInput(format!(
                "Invalid {provider} header value for '{key}': {error}"
            ))
        })?;
        map.insert(header_name, header_value);
    }

    Ok(map)
}

/// Strips the `key` query parameter so URLs can be logged.
pub(crate) fn redact_key(url: &str) -> String {
    match url.find("key=") {
        Some(start) => {
            let end = url[start..].find('&').map_or(url.len(), |offset| start + offset);
            format!("{}key=***{}", &url[..start], &url[end..])
        }
        None => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redact_key_hides_api_key() {
        assert_eq!(
            redact_key("https://host/models/m:generateContent?key=secret"),
            "https://host/models/m:generateContent?key=***"
        );
        assert_eq!(
            redact_key("https://host/m:streamGenerateContent?key=secret&alt=sse"),
            "https://host/m:streamGenerateContent?key=***&alt=sse"
        );
        assert_eq!(redact_key("https://host/none"), "https://host/none");
    }

    #[test]
    fn build_headers_rejects_invalid_name() {
        let mut headers = HashMap::new();
        headers.insert("bad header".to_string(), "v".to_string());
        assert!(matches!(
            build_headers("google", &headers),
            Err(GenerationError::InvalidInput(_))
        ));
    }
}
