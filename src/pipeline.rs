//! The fetch itself: query, extract, download, save, in that order.
use crate::error::ExtractError;
use crate::extract::{extract_image_url, Extraction};
use crate::output;
use crate::provider::DataSource;
use crate::query::Query;
use anyhow::Result;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum Outcome {
    Saved(PathBuf),
    NoImage(ExtractError),
}

/// Runs one fetch. Progress messages go to `out`; a response without an
/// image URL is reported there and returned as `Outcome::NoImage`. Every
/// other failure is returned as an error before anything is written.
pub async fn run(
    source: &impl DataSource,
    query: &Query,
    output_dir: &Path,
    out: &mut impl Write,
) -> Result<Outcome> {
    let data = source.query(query).await?;

    let image_url = match extract_image_url(&data) {
        Extraction::Found(url) => url,
        Extraction::NotFound(reason) => {
            writeln!(out, "Failed to retrieve image URL from response: {}", reason)?;
            return Ok(Outcome::NoImage(reason));
        }
    };
    writeln!(out, "Image URL: {}", image_url)?;

    let bytes = source.fetch_image(&image_url).await?;

    let path = output::save_image(output_dir, &image_url, &bytes)?;
    writeln!(out, "Image saved as {}", output::file_name_from_url(&image_url))?;
    log::info!("Saved {}", path.display());

    Ok(Outcome::Saved(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FetchConfig;
    use anyhow::anyhow;
    use serde_json::{json, Value};
    use std::fs;
    use std::sync::Mutex;

    struct MockSource {
        response: Result<Value, String>,
        image: Result<Vec<u8>, String>,
        calls: Mutex<Vec<String>>,
    }

    impl MockSource {
        fn new(response: Result<Value, String>, image: Result<Vec<u8>, String>) -> Self {
            Self {
                response,
                image,
                calls: Mutex::new(vec![]),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl DataSource for MockSource {
        async fn query(self: &Self, query: &Query) -> Result<Value> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("query {}", query.filter.vsn));
            self.response.clone().map_err(|e| anyhow!(e))
        }

        async fn fetch_image(self: &Self, url: &str) -> Result<Vec<u8>> {
            self.calls.lock().unwrap().push(format!("get {}", url));
            self.image.clone().map_err(|e| anyhow!(e))
        }
    }

    fn test_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(name);
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn lines(out: Vec<u8>) -> Vec<String> {
        String::from_utf8(out)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[tokio::test]
    async fn test_end_to_end() {
        let dir = test_dir("sage_image_fetch_pipeline_ok");
        let url = "https://storage.sagecontinuum.org/api/v1/data/W017/sample.jpg";
        let image = vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];
        let source = MockSource::new(Ok(json!([{"value": url}])), Ok(image.clone()));
        let mut out = Vec::new();

        let outcome = run(&source, &FetchConfig::default().query(), &dir, &mut out)
            .await
            .unwrap();

        let path = dir.join("sample.jpg");
        assert!(matches!(outcome, Outcome::Saved(ref p) if *p == path));
        assert_eq!(fs::read(&path).unwrap(), image);
        assert_eq!(
            lines(out),
            vec![format!("Image URL: {}", url), "Image saved as sample.jpg".to_string()]
        );
        assert_eq!(source.calls(), vec!["query W017".to_string(), format!("get {}", url)]);
    }

    #[tokio::test]
    async fn test_empty_response_skips_download() {
        let dir = test_dir("sage_image_fetch_pipeline_empty");
        let source = MockSource::new(Ok(json!([])), Ok(vec![1, 2, 3]));
        let mut out = Vec::new();

        let outcome = run(&source, &FetchConfig::default().query(), &dir, &mut out)
            .await
            .unwrap();

        assert!(matches!(outcome, Outcome::NoImage(ExtractError::IndexOutOfRange)));
        let lines = lines(out);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("Failed to retrieve image URL from response:"));
        assert!(lines[0].contains("index"));
        assert_eq!(source.calls(), vec!["query W017".to_string()]);
        assert_eq!(fs::read_dir(&dir).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_missing_value_skips_download() {
        let dir = test_dir("sage_image_fetch_pipeline_missing");
        let source = MockSource::new(Ok(json!([{"name": "upload"}])), Ok(vec![1, 2, 3]));
        let mut out = Vec::new();

        let outcome = run(&source, &FetchConfig::default().query(), &dir, &mut out)
            .await
            .unwrap();

        assert!(matches!(outcome, Outcome::NoImage(ExtractError::MissingValue)));
        assert!(lines(out)[0].contains("key"));
        assert_eq!(source.calls().len(), 1);
        assert_eq!(fs::read_dir(&dir).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_query_failure_is_fatal() {
        let dir = test_dir("sage_image_fetch_pipeline_post_err");
        let source = MockSource::new(
            Err("HTTP status server error (500 Internal Server Error)".to_string()),
            Ok(vec![1, 2, 3]),
        );
        let mut out = Vec::new();

        let result = run(&source, &FetchConfig::default().query(), &dir, &mut out).await;

        assert!(result.is_err());
        assert!(out.is_empty());
        assert_eq!(source.calls().len(), 1);
        assert_eq!(fs::read_dir(&dir).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_image_failure_is_fatal() {
        let dir = test_dir("sage_image_fetch_pipeline_get_err");
        let url = "https://storage.sagecontinuum.org/api/v1/data/W017/missing.jpg";
        let source = MockSource::new(
            Ok(json!([{"value": url}])),
            Err("HTTP status client error (404 Not Found)".to_string()),
        );
        let mut out = Vec::new();

        let result = run(&source, &FetchConfig::default().query(), &dir, &mut out).await;

        assert!(result.is_err());
        assert_eq!(lines(out), vec![format!("Image URL: {}", url)]);
        assert!(!dir.join("missing.jpg").exists());
    }
}
