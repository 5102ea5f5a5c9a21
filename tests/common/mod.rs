//! Common test utilities for news-harvester integration tests

#![allow(dead_code)]

use std::sync::Arc;

use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use news_harvester::{Config, Harvester, MemoryStore};

/// Build an in-memory ZIP archive containing the given files, in order.
pub fn zip_bytes(files: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
    let options =
        zip::write::FileOptions::default().compression_method(zip::CompressionMethod::Stored);
    for (name, content) in files {
        writer.start_file(*name, options).unwrap();
        std::io::Write::write_all(&mut writer, content).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

/// Render an Apache-style index page listing the given archive names.
pub fn listing_page(names: &[&str]) -> String {
    let mut body = String::from("<html><body><table>\n");
    body.push_str("<tr><td><a href=\"/parent/\">Parent Directory</a></td></tr>\n");
    for name in names {
        body.push_str(&format!(
            "<tr><td><a href=\"{0}\">{0}</a></td><td align=\"right\">19-Aug-2016 19:02  </td></tr>\n",
            name
        ));
    }
    body.push_str("</table></body></html>\n");
    body
}

/// Serve `listing_page(names)` at the mock server's root.
pub async fn mount_listing(server: &MockServer, names: &[&str]) {
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_page(names)))
        .mount(server)
        .await;
}

/// Serve an archive body at `/<name>`.
pub async fn mount_archive(server: &MockServer, name: &str, body: Vec<u8>) {
    Mock::given(method("GET"))
        .and(path(format!("/{}", name)))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body))
        .mount(server)
        .await;
}

/// Harvester over a fresh [`MemoryStore`], pointed at the mock server.
///
/// The returned [`TempDir`] keeps the scratch root alive for the duration of
/// the test.
pub fn build_harvester(server: &MockServer) -> (Harvester, Arc<MemoryStore>, TempDir) {
    let scratch = TempDir::new().unwrap();

    let mut config = Config::default();
    config.load_url = server.uri();
    config.scratch.root = scratch.path().to_path_buf();

    let store = Arc::new(MemoryStore::new());
    let harvester = Harvester::new(config, store.clone()).unwrap();
    (harvester, store, scratch)
}
