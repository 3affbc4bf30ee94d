use super::identifier::{owning_identifier, validate_file_name};
use crate::error::FetchError;
use reqwest::{Client, Response};
use scraper::{Html, Selector};
use std::sync::LazyLock;
use thiserror::Error;
use url::Url;

static CONTAINER_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.text-center").expect("container selector is valid"));
static LINK_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a").expect("link selector is valid"));

#[derive(Error, Debug, PartialEq, Eq)]
pub enum LinkExtractionError {
    #[error("no div with class text-center")]
    MissingContainer,
    #[error("text-center div contains no hyperlink")]
    MissingLink,
    #[error("hyperlink has no href attribute")]
    MissingHref,
}

/// Returns the `href` of the first hyperlink inside the first `div.text-center` of a landing page.
pub fn extract_download_path(html: &str) -> Result<String, LinkExtractionError> {
    let document = Html::parse_document(html);
    let container = document
        .select(&CONTAINER_SELECTOR)
        .next()
        .ok_or(LinkExtractionError::MissingContainer)?;
    let link = container
        .select(&LINK_SELECTOR)
        .next()
        .ok_or(LinkExtractionError::MissingLink)?;

    link.value()
        .attr("href")
        .map(str::to_string)
        .ok_or(LinkExtractionError::MissingHref)
}

/// Turns a manifest file name into the absolute URL of the recording it names.
#[derive(Clone, Debug)]
pub struct LinkResolver {
    client: Client,
    landing_page_base: Url,
    download_host: Url,
}

impl LinkResolver {
    pub fn new(client: Client, landing_page_base: Url, download_host: Url) -> Self {
        Self {
            client,
            landing_page_base: with_trailing_slash(landing_page_base),
            download_host: with_trailing_slash(download_host),
        }
    }

    pub fn landing_page_url(&self, file_name: &str) -> Result<Url, FetchError> {
        validate_file_name(file_name)?;
        let relative = format!("{}/{}", owning_identifier(file_name), file_name);
        self.landing_page_base
            .join(&relative)
            .map_err(|e| FetchError::InvalidUrl {
                url: format!("{}{}", self.landing_page_base, relative),
                reason: e.to_string(),
            })
    }

    pub fn download_url(&self, href: &str) -> Result<Url, FetchError> {
        self.download_host
            .join(href)
            .map_err(|e| FetchError::InvalidUrl {
                url: href.to_string(),
                reason: e.to_string(),
            })
    }

    pub async fn resolve(&self, file_name: &str) -> Result<Url, FetchError> {
        let url = self.landing_page_url(file_name)?;
        tracing::debug!(file = file_name, url = %url, "Fetching landing page");

        let landing_page_error = |e: reqwest::Error| FetchError::LandingPage {
            url: url.to_string(),
            reason: e.to_string(),
        };
        let body = self
            .client
            .get(url.clone())
            .send()
            .await
            .and_then(Response::error_for_status)
            .map_err(landing_page_error)?
            .text()
            .await
            .map_err(landing_page_error)?;

        let href =
            extract_download_path(&body).map_err(|e| FetchError::MissingDownloadLink {
                url: url.to_string(),
                reason: e.to_string(),
            })?;
        tracing::trace!(file = file_name, href = %href, "Found download link");

        self.download_url(&href)
    }
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    const LANDING_PAGE: &str = r#"<!DOCTYPE html>
<html>
  <body>
    <h1>chb01_03.edf</h1>
    <div class="col-md-8 text-center">
      <a class="btn btn-primary" href="/files/chbmit/1.0.0/chb01/chb01_03.edf?download">Download</a>
      <a href="/other">Other</a>
    </div>
  </body>
</html>"#;

    fn resolver(base: &str) -> LinkResolver {
        LinkResolver::new(
            Client::new(),
            Url::parse(&format!("{base}/content/chbmit/1.0.0/")).unwrap(),
            Url::parse(base).unwrap(),
        )
    }

    #[test]
    fn test_extract_download_path_first_link_in_container() {
        assert_eq!(
            extract_download_path(LANDING_PAGE).unwrap(),
            "/files/chbmit/1.0.0/chb01/chb01_03.edf?download"
        );
    }

    #[test]
    fn test_extract_download_path_ignores_links_outside_container() {
        let html = r#"<a href="/nav">Nav</a><div class="text-center"><p><a href="/files/x.edf">x</a></p></div>"#;
        assert_eq!(extract_download_path(html).unwrap(), "/files/x.edf");
    }

    #[test]
    fn test_extract_download_path_missing_container() {
        let html = r#"<div class="text-left"><a href="/files/x.edf">x</a></div>"#;
        assert_eq!(
            extract_download_path(html),
            Err(LinkExtractionError::MissingContainer)
        );
    }

    #[test]
    fn test_extract_download_path_only_first_container_is_searched() {
        let html = r#"<div class="text-center">empty</div><div class="text-center"><a href="/files/x.edf">x</a></div>"#;
        assert_eq!(
            extract_download_path(html),
            Err(LinkExtractionError::MissingLink)
        );
    }

    #[test]
    fn test_extract_download_path_link_without_href() {
        let html = r#"<div class="text-center"><a name="anchor">x</a></div>"#;
        assert_eq!(
            extract_download_path(html),
            Err(LinkExtractionError::MissingHref)
        );
    }

    #[test]
    fn test_landing_page_url() {
        let resolver = resolver("https://physionet.org");
        assert_eq!(
            resolver.landing_page_url("chb01_03.edf").unwrap().as_str(),
            "https://physionet.org/content/chbmit/1.0.0/chb01/chb01_03.edf"
        );
        assert_eq!(
            resolver.landing_page_url("chb17a_03.edf").unwrap().as_str(),
            "https://physionet.org/content/chbmit/1.0.0/chb17/chb17a_03.edf"
        );
    }

    #[test]
    fn test_landing_page_base_without_trailing_slash() {
        let resolver = LinkResolver::new(
            Client::new(),
            Url::parse("https://physionet.org/content/chbmit/1.0.0").unwrap(),
            Url::parse("https://physionet.org").unwrap(),
        );
        assert_eq!(
            resolver.landing_page_url("chb02_16.edf").unwrap().as_str(),
            "https://physionet.org/content/chbmit/1.0.0/chb02/chb02_16.edf"
        );
    }

    #[test]
    fn test_landing_page_url_rejects_path_like_names() {
        let resolver = resolver("https://physionet.org");
        for name in ["/chb01_03.edf", "../../chb01_03.edf", "chb01/../x.edf"] {
            assert!(
                matches!(
                    resolver.landing_page_url(name),
                    Err(FetchError::InvalidFileName { .. })
                ),
                "{name}"
            );
        }
    }

    #[test]
    fn test_download_url_joins_site_relative_path() {
        let resolver = resolver("https://physionet.org");
        assert_eq!(
            resolver
                .download_url("/files/chbmit/1.0.0/chb01/chb01_03.edf?download")
                .unwrap()
                .as_str(),
            "https://physionet.org/files/chbmit/1.0.0/chb01/chb01_03.edf?download"
        );
        assert_eq!(
            resolver.download_url("files/chb01_03.edf").unwrap().as_str(),
            "https://physionet.org/files/chb01_03.edf"
        );
    }

    #[tokio::test]
    async fn test_resolve_against_landing_page() {
        let mut server = mockito::Server::new_async().await;
        let page = server
            .mock("GET", "/content/chbmit/1.0.0/chb01/chb01_03.edf")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body(LANDING_PAGE)
            .create_async()
            .await;

        let url = resolver(&server.url()).resolve("chb01_03.edf").await.unwrap();

        assert_eq!(
            url.as_str(),
            format!(
                "{}/files/chbmit/1.0.0/chb01/chb01_03.edf?download",
                server.url()
            )
        );
        page.assert_async().await;
    }

    #[tokio::test]
    async fn test_resolve_fails_on_error_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/content/chbmit/1.0.0/chb09/chb09_01.edf")
            .with_status(404)
            .create_async()
            .await;

        let result = resolver(&server.url()).resolve("chb09_01.edf").await;
        assert!(matches!(result, Err(FetchError::LandingPage { .. })));
    }

    #[tokio::test]
    async fn test_resolve_fails_without_container() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/content/chbmit/1.0.0/chb03/chb03_01.edf")
            .with_status(200)
            .with_body("<html><body><p>Moved</p></body></html>")
            .create_async()
            .await;

        let result = resolver(&server.url()).resolve("chb03_01.edf").await;
        match result {
            Err(FetchError::MissingDownloadLink { reason, .. }) => {
                assert_eq!(reason, LinkExtractionError::MissingContainer.to_string())
            }
            other => panic!("expected MissingDownloadLink, got {other:?}"),
        }
    }
}
