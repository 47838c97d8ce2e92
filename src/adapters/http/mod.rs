//! HTTP adapter: Implementation of PatientApi over the collaborator REST API.
//!
//! Uses a blocking `reqwest` client; calls are made from the request worker
//! thread, never from the UI loop. Every request disables caching.

use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, HeaderValue, CACHE_CONTROL, PRAGMA};
use reqwest::{Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::config::Config;
use crate::domain::Patient;
use crate::ports::{ApiError, PatientApi};

/// Error body shape returned by the API.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: serde_json::Value,
}

/// Patient API client.
pub struct HttpPatientApi {
    client: Client,
    base_url: Url,
}

impl HttpPatientApi {
    /// Build a client for the configured base URL and timeout.
    ///
    /// # Errors
    /// Returns `ApiError::Transport` if the TLS backend cannot be initialized.
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));

        let client = Client::builder()
            .timeout(config.http_timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.api_base_url.clone(),
        })
    }

    /// `<base>/patients` or `<base>/patients/<id>`, with the id escaped as one segment.
    fn endpoint(&self, id: Option<&str>) -> Result<Url, ApiError> {
        patients_url(&self.base_url, id)
    }

    fn send(
        &self,
        method: Method,
        id: Option<&str>,
        body: Option<&Patient>,
    ) -> Result<Response, ApiError> {
        let url = self.endpoint(id)?;
        let mut request = self.client.request(method.clone(), url.clone());
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().map_err(|e| {
            tracing::warn!(method = %method, path = url.path(), "Patient API unreachable: {e}");
            ApiError::Transport(e.to_string())
        })?;

        let status = response.status();
        tracing::debug!(method = %method, path = url.path(), status = status.as_u16(), "Patient API response");

        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().unwrap_or_default();
        Err(classify_status(status, &text, id))
    }

    fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let text = response.text().map_err(|e| ApiError::Transport(e.to_string()))?;
        serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

fn patients_url(base: &Url, id: Option<&str>) -> Result<Url, ApiError> {
    let mut url = base.clone();
    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|()| ApiError::Transport(format!("{base} cannot be used as a base URL")))?;
        segments.pop_if_empty().push("patients");
        if let Some(id) = id {
            segments.push(id);
        }
    }
    Ok(url)
}

fn decode_rows(rows: Vec<serde_json::Value>) -> Vec<Patient> {
    let total = rows.len();
    let patients: Vec<Patient> = rows
        .into_iter()
        .enumerate()
        .filter_map(|(idx, row)| match serde_json::from_value(row) {
            Ok(patient) => Some(patient),
            Err(e) => {
                tracing::warn!(row = idx, "Skipping undecodable patient record: {e}");
                None
            }
        })
        .collect();
    if patients.len() < total {
        tracing::warn!(skipped = total - patients.len(), total, "Patient list contained bad records");
    }
    patients
}

/// Map a non-success response to an `ApiError`.
///
/// A 404 on a by-id request is `NotFound`. Otherwise a JSON `message` (string
/// or list of strings) is carried along verbatim.
fn classify_status(status: StatusCode, body: &str, id: Option<&str>) -> ApiError {
    if status == StatusCode::NOT_FOUND {
        if let Some(id) = id {
            return ApiError::NotFound(id.to_string());
        }
    }

    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|body| match body.message {
            serde_json::Value::String(s) => Some(s),
            serde_json::Value::Array(items) => {
                let parts: Vec<String> = items
                    .into_iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect();
                (!parts.is_empty()).then(|| parts.join(", "))
            }
            _ => None,
        })
        .filter(|m| !m.trim().is_empty());

    ApiError::Status {
        status: status.as_u16(),
        message,
    }
}

impl PatientApi for HttpPatientApi {
    /// Rows that do not decode (unknown `dnaStatus`, missing id) are logged and skipped.
    fn list_patients(&self) -> Result<Vec<Patient>, ApiError> {
        let response = self.send(Method::GET, None, None)?;
        let rows: Vec<serde_json::Value> = Self::read_json(response)?;
        Ok(decode_rows(rows))
    }

    fn get_patient(&self, id: &str) -> Result<Patient, ApiError> {
        let response = self.send(Method::GET, Some(id), None)?;
        Self::read_json(response)
    }

    fn create_patient(&self, patient: &Patient) -> Result<Patient, ApiError> {
        let response = self.send(Method::POST, None, Some(patient))?;
        Self::read_json(response)
    }

    fn update_patient(&self, id: &str, patient: &Patient) -> Result<Patient, ApiError> {
        let response = self.send(Method::PATCH, Some(id), Some(patient))?;
        Self::read_json(response)
    }

    fn delete_patient(&self, id: &str) -> Result<(), ApiError> {
        let response = self.send(Method::DELETE, Some(id), None)?;
        if response.status() != StatusCode::NO_CONTENT {
            tracing::warn!(status = response.status().as_u16(), "Delete succeeded with unexpected status");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::time::Duration;

    /// Serve one canned response and hand back the raw request head.
    fn serve_once(status_line: &'static str, body: &'static str) -> (Url, std::thread::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").expect("Should bind");
        let addr = listener.local_addr().expect("Should have addr");
        let handle = std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().expect("Should accept");
            let mut request = Vec::new();
            let mut chunk = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut chunk).expect("Should read");
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&chunk[..n]);
            }
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).expect("Should write");
            String::from_utf8_lossy(&request).to_string()
        });
        let url = Url::parse(&format!("http://{addr}")).expect("Should parse");
        (url, handle)
    }

    fn api_for(base_url: Url) -> HttpPatientApi {
        let config = Config {
            api_base_url: base_url,
            http_timeout: Duration::from_secs(5),
            state_path: "unused.db".into(),
            offline: false,
        };
        HttpPatientApi::new(&config).expect("Should build client")
    }

    #[test]
    fn test_endpoint_paths() {
        let root = Url::parse("http://localhost:3001").expect("Should parse");
        assert_eq!(
            patients_url(&root, None).expect("Should build").as_str(),
            "http://localhost:3001/patients"
        );
        assert_eq!(
            patients_url(&root, Some("patient-1")).expect("Should build").path(),
            "/patients/patient-1"
        );

        let nested = Url::parse("https://api.example.com/v1").expect("Should parse");
        assert_eq!(
            patients_url(&nested, Some("a/b")).expect("Should build").path(),
            "/v1/patients/a%2Fb"
        );
    }

    #[test]
    fn test_classify_status() {
        assert!(matches!(
            classify_status(StatusCode::NOT_FOUND, "", Some("patient-9")),
            ApiError::NotFound(id) if id == "patient-9"
        ));

        match classify_status(StatusCode::BAD_REQUEST, r#"{"message":"dob must be a string"}"#, None) {
            ApiError::Status { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message.as_deref(), Some("dob must be a string"));
            }
            other => panic!("unexpected {other:?}"),
        }

        match classify_status(
            StatusCode::BAD_REQUEST,
            r#"{"message":["firstName should not be empty","city should not be empty"],"statusCode":400}"#,
            None,
        ) {
            ApiError::Status { message, .. } => assert_eq!(
                message.as_deref(),
                Some("firstName should not be empty, city should not be empty")
            ),
            other => panic!("unexpected {other:?}"),
        }

        match classify_status(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>", None) {
            ApiError::Status { status, message } => {
                assert_eq!(status, 500);
                assert!(message.is_none());
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_list_sends_no_cache_headers() {
        let (url, server) = serve_once(
            "200 OK",
            r#"[{"id":"patient-1","name":"김철수","firstName":"철수","lastName":"김","dnaStatus":"Completed","dnaId":"PRDV-C4M6-2E1N-G8FM"}]"#,
        );
        let patients = api_for(url).list_patients().expect("Should list");
        assert_eq!(patients.len(), 1);
        assert_eq!(patients[0].name, "김철수");

        let request = server.join().expect("Server thread").to_ascii_lowercase();
        assert!(request.starts_with("get /patients "));
        assert!(request.contains("cache-control: no-cache"));
        assert!(request.contains("pragma: no-cache"));
    }

    #[test]
    fn test_list_skips_bad_rows() {
        let (url, server) = serve_once(
            "200 OK",
            r#"[{"id":"patient-1","firstName":"철수","lastName":"김","dnaStatus":"Completed","dnaId":"PRDV-C4M6-2E1N-G8FM"},{"id":"patient-2","firstName":"영희","lastName":"이","dnaStatus":"Lost In Transit"},{"id":"patient-3","firstName":"민수","lastName":"박"},{"id":"patient-4","firstName":"지은","lastName":"최","dnaStatus":"DNA Analyzed"}]"#,
        );
        let patients = api_for(url).list_patients().expect("Should list");
        let ids: Vec<&str> = patients.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["patient-1", "patient-4"]);
        server.join().expect("Server thread");
    }

    #[test]
    fn test_get_unknown_patient() {
        let (url, server) = serve_once("404 Not Found", r#"{"message":"Patient not found"}"#);
        let err = api_for(url).get_patient("missing").expect_err("Should fail");
        assert!(matches!(err, ApiError::NotFound(_)));
        server.join().expect("Server thread");
    }

    #[test]
    fn test_bad_body_is_decode_error() {
        let (url, server) = serve_once("200 OK", r#"{"not":"a list"}"#);
        let err = api_for(url).list_patients().expect_err("Should fail");
        assert!(matches!(err, ApiError::Decode(_)));
        server.join().expect("Server thread");
    }

    #[test]
    fn test_unreachable_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").expect("Should bind");
        let addr = listener.local_addr().expect("Should have addr");
        drop(listener);

        let url = Url::parse(&format!("http://{addr}")).expect("Should parse");
        let err = api_for(url).list_patients().expect_err("Should fail");
        assert!(matches!(err, ApiError::Transport(_)));
    }
}
