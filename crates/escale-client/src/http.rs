//! Blocking HTTP implementation of [`SheetBackend`].

use std::collections::BTreeMap;
use std::io::Read;
use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::{StatusCode, Url};
use serde_json::Value;
use tracing::debug;

use escale_ingest::{decode_schema, decode_sheet_page};
use escale_model::{RowId, SheetPage, SheetSchema};

use crate::backend::SheetBackend;
use crate::download::{DownloadProgress, format_bytes};
use crate::error::{ApiError, Result};
use crate::session::Session;

/// HTTP request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Read buffer size for streamed downloads.
const DOWNLOAD_CHUNK: usize = 8192;

/// REST client for one backend server.
pub struct HttpBackend {
    /// HTTP client.
    client: Client,
    /// Base URL, e.g. `http://localhost:8000/api`.
    base: Url,
    /// Shared bearer-token state.
    session: Session,
}

impl HttpBackend {
    /// Create a client for the given base URL.
    pub fn new(base_url: &str, session: Session) -> Result<Self> {
        let base = Url::parse(base_url).map_err(|err| ApiError::BaseUrl(err.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(ApiError::BaseUrl(format!(
                "{base_url} cannot carry path segments"
            )));
        }

        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            client,
            base,
            session,
        })
    }

    /// Endpoint URL under the base, one path element per segment.
    ///
    /// Segments are percent-encoded, so file and sheet names may carry
    /// spaces, slashes or accents. The backend routes end in a slash, so
    /// one is always appended.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|()| ApiError::BaseUrl(self.base.to_string()))?;
            path.pop_if_empty();
            path.extend(segments);
            path.push("");
        }
        Ok(url)
    }

    /// Attach the bearer token when the session holds one.
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Map a response to success or the API error it carries.
    ///
    /// A 401 signs the session out before reporting, so every later call
    /// fails fast instead of hammering the backend with a dead token.
    fn check(&self, response: Response) -> Result<Response> {
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            self.session.sign_out();
            return Err(ApiError::AccessDenied);
        }
        if status == StatusCode::FORBIDDEN {
            return Err(ApiError::AccessDenied);
        }
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: error_message(response, status),
            });
        }
        Ok(response)
    }

    fn get_json(&self, url: Url) -> Result<Value> {
        debug!(%url, "GET");
        let response = self.authorize(self.client.get(url)).send()?;
        let response = self.check(response)?;
        response
            .json()
            .map_err(|err| ApiError::Decode(err.to_string()))
    }

    /// Download the workbook, reporting progress as chunks arrive.
    pub fn download_with_progress<F>(&self, filename: &str, mut on_progress: F) -> Result<Vec<u8>>
    where
        F: FnMut(DownloadProgress),
    {
        let url = self.endpoint(&["files", filename, "download"])?;
        debug!(%url, "GET (download)");
        let response = self.authorize(self.client.get(url)).send()?;
        let mut response = self.check(response)?;

        let total = response.content_length().unwrap_or(0);
        let mut data = Vec::new();
        let mut buffer = [0u8; DOWNLOAD_CHUNK];
        loop {
            let read = response
                .read(&mut buffer)
                .map_err(|err| ApiError::Transport(err.to_string()))?;
            if read == 0 {
                break;
            }
            data.extend_from_slice(&buffer[..read]);
            on_progress(DownloadProgress::new(data.len() as u64, total));
        }

        debug!("download complete: {}", format_bytes(data.len() as u64));
        Ok(data)
    }
}

impl SheetBackend for HttpBackend {
    fn fetch_schema(&self, filename: &str, sheet_name: &str) -> Result<SheetSchema> {
        let url = self.endpoint(&["files", filename, "sheets", sheet_name, "columns"])?;
        let body = self.get_json(url)?;
        Ok(decode_schema(&body, filename, sheet_name))
    }

    fn fetch_page(&self, filename: &str, sheet_name: &str) -> Result<SheetPage> {
        let url = self.endpoint(&["files", filename, "sheets", sheet_name, "data"])?;
        let body = self.get_json(url)?;
        Ok(decode_sheet_page(&body))
    }

    fn create_row(
        &self,
        filename: &str,
        sheet_name: &str,
        cells: &BTreeMap<String, String>,
    ) -> Result<()> {
        let url = self.endpoint(&["files", filename, "sheets", sheet_name, "add"])?;
        debug!(%url, "POST");
        let request = self.client.post(url).json(&cell_body(cells, None));
        let response = self.authorize(request).send()?;
        self.check(response)?;
        Ok(())
    }

    fn update_row(
        &self,
        filename: &str,
        sheet_name: &str,
        id: RowId,
        cells: &BTreeMap<String, String>,
    ) -> Result<()> {
        let url = self.endpoint(&["files", filename, "sheets", sheet_name, "update"])?;
        debug!(%url, row_id = id.get(), "PUT");
        let request = self.client.put(url).json(&cell_body(cells, Some(id)));
        let response = self.authorize(request).send()?;
        self.check(response)?;
        Ok(())
    }

    fn delete_row(&self, filename: &str, sheet_name: &str, id: RowId) -> Result<()> {
        let url = self.endpoint(&["files", filename, "sheets", sheet_name, "delete"])?;
        debug!(%url, row_id = id.get(), "DELETE");
        let request = self.client.delete(url).query(&[("row_id", id.get())]);
        let response = self.authorize(request).send()?;
        self.check(response)?;
        Ok(())
    }

    fn download(&self, filename: &str) -> Result<Vec<u8>> {
        self.download_with_progress(filename, |_| {})
    }
}

/// Pull the `error` field the backend puts in failure bodies.
fn error_message(response: Response, status: StatusCode) -> String {
    let body: Option<Value> = response.json().ok();
    body.as_ref()
        .and_then(|body| body.get("error"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string()
        })
}

/// JSON body for add/update: one string per column, plus the row id on update.
fn cell_body(cells: &BTreeMap<String, String>, id: Option<RowId>) -> Value {
    let mut body = serde_json::Map::new();
    if let Some(id) = id {
        body.insert("_row_id".to_string(), Value::from(id.get()));
    }
    for (column, value) in cells {
        body.insert(column.clone(), Value::String(value.clone()));
    }
    Value::Object(body)
}
