use crate::{interpret, ApiKey, BodyEncoding, Client, Error, Interpretation, Payload, Presenter};
use std::io::Write;

/// Target URL submitted when none is given.
pub const DEFAULT_TARGET_URL: &str = "http://www.google.com";

/// Everything one scan needs to know.
#[derive(Clone, Debug)]
pub struct ScanConfig {
    /// URL submitted to the testing service.
    pub url: String,
    /// Key under test. An empty key counts as absent.
    pub api_key: Option<ApiKey>,
    /// Project whose database URL is printed after the scan.
    pub project: Option<String>,
    /// Echo the request body before sending it.
    pub show_post: bool,
    /// Wire layout of the request body.
    pub encoding: BodyEncoding,
    /// Style the report with ANSI colors.
    pub color: bool,
}

impl Default for ScanConfig {
    fn default() -> ScanConfig {
        ScanConfig {
            url: DEFAULT_TARGET_URL.to_owned(),
            api_key: None,
            project: None,
            show_post: false,
            encoding: BodyEncoding::default(),
            color: false,
        }
    }
}

impl ScanConfig {
    /// The key under test, if a non-empty one was given.
    #[must_use]
    pub fn api_key(&self) -> Option<&ApiKey> {
        self.api_key.as_ref().filter(|key| !key.is_empty())
    }

    /// The project name, if a non-empty one was given.
    #[must_use]
    pub fn project(&self) -> Option<&str> {
        self.project.as_deref().filter(|project| !project.is_empty())
    }

    /// Returns false if there is neither a key to test nor a project to print.
    #[must_use]
    pub fn has_work(&self) -> bool {
        self.api_key().is_some() || self.project().is_some()
    }
}

/// Runs one scan, writing the report to `out`.
///
/// If a key is configured it is tested against the service and the interpreted response is
/// returned. The project URL, if any, is printed afterwards. Transport and decode failures end
/// the scan immediately.
#[tracing::instrument(skip_all, fields(url = %config.url))]
pub async fn run<W: Write>(
    client: &Client,
    config: &ScanConfig,
    out: W,
) -> Result<Option<Interpretation>, Error> {
    let mut presenter = Presenter::new(out, config.color);
    let mut interpretation = None;

    if let Some(key) = config.api_key() {
        presenter.banner(key.as_str(), chrono::Utc::now())?;

        let payload = Payload::new(&config.url, key.as_str());
        if config.show_post {
            presenter.post_body(&payload)?;
        }

        let body = client.issue_request(&payload, config.encoding).await?;
        let result = interpret(&body)?;
        presenter.result(&result)?;
        interpretation = Some(result);
    }

    if let Some(project) = config.project() {
        presenter.project(project)?;
    }

    presenter.into_inner().flush()?;
    Ok(interpretation)
}

#[cfg(test)]
mod tests {
    use super::{run, ScanConfig, DEFAULT_TARGET_URL};
    use crate::{ApiKey, Client, Error, Interpretation};
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client_for(body: &str) -> (MockServer, Client) {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(query_param("key", "AIzaTest"))
            .respond_with(ResponseTemplate::new(403).set_body_string(body))
            .mount(&mock_server)
            .await;
        let client = Client::new().unwrap().with_base_url(mock_server.uri());
        (mock_server, client)
    }

    fn config() -> ScanConfig {
        ScanConfig {
            api_key: Some(ApiKey::from("AIzaTest")),
            ..ScanConfig::default()
        }
    }

    #[test]
    fn test_has_work() {
        assert!(!ScanConfig::default().has_work());
        assert!(!ScanConfig {
            api_key: Some(ApiKey::default()),
            project: Some(String::new()),
            ..ScanConfig::default()
        }
        .has_work());
        assert!(config().has_work());
        assert!(ScanConfig {
            project: Some("demo".into()),
            ..ScanConfig::default()
        }
        .has_work());
        assert_eq!(ScanConfig::default().url, DEFAULT_TARGET_URL);
    }

    #[tokio::test]
    async fn test_run_reports_denied_key() {
        let (_mock_server, client) = client_for(
            r#"{"error":{"code":403,"message":"Requests from this client are not allowed. See docs.","status":"PERMISSION_DENIED"}}"#,
        )
        .await;

        let mut out = Vec::new();
        let interpretation = run(&client, &config(), &mut out).await.unwrap();
        assert_eq!(
            interpretation,
            Some(Interpretation {
                code: 403,
                status: "PERMISSION_DENIED".into(),
                short_message: "Requests from this client are not allowed.".into(),
            })
        );

        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("Checking restrictions on API key AIzaTest"));
        assert!(output.contains("Tested on: "));
        assert!(output.contains("Response Code:  403"));
        assert!(output.contains("Status:         PERMISSION_DENIED"));
        assert!(output.contains("Message:        Requests from this client are not allowed.\n"));
        assert!(!output.contains("POST Body:"));
        assert!(!output.contains("See docs."));
    }

    #[tokio::test]
    async fn test_run_echoes_post_body_and_project() {
        let (_mock_server, client) = client_for(r#"{"error":{}}"#).await;

        let config = ScanConfig {
            url: "https://target.example".into(),
            show_post: true,
            project: Some("demo".into()),
            ..config()
        };
        let mut out = Vec::new();
        let interpretation = run(&client, &config, &mut out).await.unwrap();
        assert_eq!(interpretation, Some(Interpretation::default()));

        let output = String::from_utf8(out).unwrap();
        let post = output.find("POST Body:").unwrap();
        let code = output.find("Response Code:").unwrap();
        let project = output.find("https://demo.firebase.com/.json").unwrap();
        assert!(post < code && code < project);
        assert!(output.contains("'https://target.example'"));
        assert!(output.contains("'AIzaTest'"));
    }

    #[tokio::test]
    async fn test_run_decode_failure() {
        let (_mock_server, client) = client_for("not json").await;

        let mut out = Vec::new();
        let result = run(&client, &config(), &mut out).await;
        assert!(matches!(result, Err(Error::Decode(_))));
        assert!(!String::from_utf8(out).unwrap().contains("Response Code:"));
    }

    #[tokio::test]
    async fn test_run_project_only_makes_no_request() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;
        let client = Client::new().unwrap().with_base_url(mock_server.uri());

        let config = ScanConfig {
            project: Some("demo".into()),
            ..ScanConfig::default()
        };
        let mut out = Vec::new();
        assert_eq!(run(&client, &config, &mut out).await.unwrap(), None);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "https://demo.firebase.com/.json\n"
        );
    }
}
