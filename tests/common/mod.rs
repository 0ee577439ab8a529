//! Shared fixture for integration tests: a temporary web root with three
//! applications and an extension.

#![allow(dead_code)]

use std::path::Path;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use tempfile::TempDir;
use tower::ServiceExt;

use server_pages::config::loader::parse_config;
use server_pages::{lifecycle, HttpServer, ServerPagesConfig};

pub struct Fixture {
    pub dir: TempDir,
    pub config: ServerPagesConfig,
}

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}

impl Fixture {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();

        write(root, "shop/index.html", "<h1>shop</h1>");
        write(root, "shop/css/style.css", "shop style");
        write(root, "shop/css/base.css", "shop base");
        write(root, "shop/pages/about.ftl", "<p>about</p>");
        write(root, "shop/errors/500.ftl", "<h1>something broke</h1>");
        write(root, "theme/css/style.css", "theme style");
        write(root, "lib/jquery.js", "jquery");
        write(root, "docs/index.html", "<h1>docs</h1>");
        write(root, "docs/errors/404.html", "<h1>no such page</h1>");
        write(root, "plain/index.html", "plain");
        write(root, "outside.txt", "secret");

        let config = parse_config(&format!(
            r#"
[observability]
startup_report = false

[[apps]]
name = "shop"
mount_path = "/shop"
assets_location = "{root}/shop"
spa = true
assets = [{{ prefix = "/lib", location = "{root}/lib" }}]
error_pages = [{{ status = 500, page = "errors/500.ftl" }}]

[[apps]]
name = "docs"
mount_path = "/docs"
assets_location = "{root}/docs"
error_pages = [{{ status = 404, page = "errors/404.html" }}]

[[apps]]
name = "plain"
mount_path = "/plain"
assets_location = "{root}/plain"

[[extensions]]
app = "shop"
assets = [{{ location = "{root}/theme" }}]
"#,
            root = root.display()
        ))
        .unwrap();

        Self { dir, config }
    }

    /// Router with the filesystem collaborators.
    pub fn router(&self) -> Router {
        let apps = lifecycle::start(&self.config).unwrap();
        let engine = lifecycle::build_engine(&self.config, apps);
        HttpServer::new(self.config.clone(), engine).router()
    }
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn get_html(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("accept", "text/html,application/xhtml+xml")
        .body(Body::empty())
        .unwrap()
}

pub async fn send(router: Router, request: Request<Body>) -> Response<Body> {
    router.oneshot(request).await.unwrap()
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
