use std::{error, fmt, sync::Arc, time::Duration};

use async_trait::async_trait;
use model::track::ParsedTrack;
use tracks::{source::TrackSource, RequestError, RequestResult};

pub mod parser;

pub use parser::parse_igc;

#[derive(Debug, Clone)]
pub enum IgcError {
    RequestError(Arc<reqwest::Error>),
    InvalidResponse {
        status_code: reqwest::StatusCode,
        url: String,
    },
    MissingHeader(&'static str),
    InvalidDate(String),
}

impl error::Error for IgcError {}

impl fmt::Display for IgcError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            IgcError::RequestError(e) => write!(f, "HTTP request error: {}", e),
            IgcError::InvalidResponse { status_code, url } => {
                write!(f, "Invalid Response ({}) {}", status_code, url)
            }
            IgcError::MissingHeader(header) => {
                write!(f, "IGC file has no {} header", header)
            }
            IgcError::InvalidDate(date) => write!(f, "Invalid IGC date: {}", date),
        }
    }
}

impl From<reqwest::Error> for IgcError {
    fn from(e: reqwest::Error) -> Self {
        IgcError::RequestError(Arc::new(e))
    }
}

impl From<IgcError> for RequestError {
    fn from(value: IgcError) -> Self {
        RequestError::parse_error(value)
    }
}

/// Reads IGC flight logs from http(s) urls.
#[derive(Debug, Clone)]
pub struct IgcSource {
    client: reqwest::Client,
}

impl IgcSource {
    pub fn new(timeout: Duration) -> Result<Self, IgcError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    pub async fn download(&self, url: &str) -> Result<String, IgcError> {
        let response = self.client.get(url).send().await?;
        let status_code = response.status();
        if !status_code.is_success() {
            return Err(IgcError::InvalidResponse {
                status_code,
                url: url.to_owned(),
            });
        }
        Ok(response.text().await?)
    }

    pub async fn read(&self, url: &str) -> Result<ParsedTrack, IgcError> {
        let content = self.download(url).await?;
        let track = parse_igc(&content)?;
        log::info!("read {} fixes from {}", track.points.len(), url);
        Ok(track)
    }
}

#[async_trait]
impl TrackSource for IgcSource {
    async fn fetch_track(&self, url: &str) -> RequestResult<ParsedTrack> {
        self.read(url).await.map_err(|why| {
            log::error!("could not read igc file {}: {}", url, why);
            why.into()
        })
    }
}
