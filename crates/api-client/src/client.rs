use desk_core::{
    ApiError, ApiResult, ErrorBody, FollowUpReminder, Patient, PatientDraft, PatientId,
    PatientsApi, RiskAnalysis, TreatmentDraft,
};
use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Errors that can occur while constructing the client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("invalid Patients API base URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}

pub type ClientResult<T> = std::result::Result<T, ClientError>;

/// Patients API over HTTP/JSON.
///
/// Endpoints are resolved under the base URL, so a base of `http://host/desk` addresses
/// `http://host/desk/api/patients`. No timeouts or retries are configured beyond reqwest's
/// defaults; every failure is reported once to the caller.
#[derive(Clone, Debug)]
pub struct HttpPatientsApi {
    client: Client,
    base_url: Url,
}

impl HttpPatientsApi {
    /// Create a client with a default reqwest `Client`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidBaseUrl` if `base_url` is not an absolute `http` or `https`
    /// URL, or `ClientError::Build` if the TLS backend cannot be initialised.
    pub fn new(base_url: &str) -> ClientResult<Self> {
        let client = Client::builder().build()?;
        Self::with_client(client, base_url)
    }

    /// Create a client around an existing reqwest `Client`.
    pub fn with_client(client: Client, base_url: &str) -> ClientResult<Self> {
        let invalid = |reason: String| ClientError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason,
        };

        let mut url = Url::parse(base_url.trim()).map_err(|e| invalid(e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme {:?}", url.scheme())));
        }
        url.set_query(None);
        url.set_fragment(None);

        Ok(Self {
            client,
            base_url: url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append percent-encoded path segments to the base URL.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // http(s) URLs always have a path to extend.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get(&self, url: Url) -> ApiResult<Response> {
        tracing::debug!(%url, "GET");
        self.client.get(url).send().await.map_err(transport)
    }

    async fn post<B>(&self, url: Url, body: &B) -> ApiResult<()>
    where
        B: Serialize + Sync,
    {
        tracing::debug!(%url, "POST");
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(transport)?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(failure(response).await)
        }
    }

    /// GET a single resource, reporting 404 as `ApiError::NotFound`.
    async fn lookup<T: DeserializeOwned>(&self, url: Url) -> ApiResult<T> {
        let response = self.get(url).await?;
        match response.status() {
            status if status.is_success() => decode(response).await,
            StatusCode::NOT_FOUND => Err(ApiError::NotFound),
            _ => Err(failure(response).await),
        }
    }
}

fn transport(e: reqwest::Error) -> ApiError {
    ApiError::Transport(e.to_string())
}

async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let body = response.bytes().await.map_err(transport)?;
    serde_json::from_slice(&body).map_err(|e| ApiError::Payload(e.to_string()))
}

/// Build a status error, picking up a non-blank `error` field of a JSON body if there is one.
async fn failure(response: Response) -> ApiError {
    let status = response.status().as_u16();
    let message = match response.bytes().await {
        Ok(body) => serde_json::from_slice::<ErrorBody>(&body)
            .ok()
            .map(|b| b.error)
            .filter(|m| !m.trim().is_empty()),
        Err(_) => None,
    };
    ApiError::Status { status, message }
}

impl PatientsApi for HttpPatientsApi {
    async fn list_patients(&self) -> ApiResult<Vec<Patient>> {
        let response = self.get(self.endpoint(&["api", "patients"])).await?;
        if !response.status().is_success() {
            return Err(failure(response).await);
        }
        decode(response).await
    }

    async fn get_patient(&self, id: &PatientId) -> ApiResult<Patient> {
        let id = id.to_string();
        self.lookup(self.endpoint(&["api", "patients", &id])).await
    }

    async fn save_patient(&self, draft: &PatientDraft) -> ApiResult<()> {
        self.post(self.endpoint(&["api", "patients"]), draft).await
    }

    async fn patient_risk(&self, id: &PatientId) -> ApiResult<RiskAnalysis> {
        let id = id.to_string();
        self.lookup(self.endpoint(&["api", "patients", &id, "risk"]))
            .await
    }

    async fn patient_reminder(&self, id: &PatientId) -> ApiResult<FollowUpReminder> {
        let id = id.to_string();
        self.lookup(self.endpoint(&["api", "patients", &id, "reminder"]))
            .await
    }

    async fn record_treatment(&self, draft: &TreatmentDraft) -> ApiResult<()> {
        self.post(self.endpoint(&["api", "treatments"]), draft).await
    }
}
