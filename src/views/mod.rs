//! Server-rendered HTML pages.
//!
//! Templates are compiled into the binary and parsed once on first use.
//! Every template name ends in `.html`, so tera escapes all interpolated
//! values on output.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use once_cell::sync::Lazy;
use serde::Serialize;
use tera::{Context, Tera};
use tracing::error;

const TEMPLATES: &[(&str, &str)] = &[
    ("layout.html", include_str!("../../templates/layout.html")),
    ("index.html", include_str!("../../templates/index.html")),
    ("error.html", include_str!("../../templates/error.html")),
    ("author_list.html", include_str!("../../templates/author_list.html")),
    ("author_detail.html", include_str!("../../templates/author_detail.html")),
    ("author_form.html", include_str!("../../templates/author_form.html")),
    ("author_delete.html", include_str!("../../templates/author_delete.html")),
    ("genre_list.html", include_str!("../../templates/genre_list.html")),
    ("genre_detail.html", include_str!("../../templates/genre_detail.html")),
    ("genre_form.html", include_str!("../../templates/genre_form.html")),
    ("genre_delete.html", include_str!("../../templates/genre_delete.html")),
];

pub static VIEWS: Lazy<Tera> = Lazy::new(|| {
    let mut tera = Tera::default();
    if let Err(e) = tera.add_raw_templates(TEMPLATES.iter().copied()) {
        panic!("Failed to parse built-in templates: {}", e);
    }
    tera
});

/// A template plus the values it is rendered with
#[derive(Debug)]
pub struct Page {
    template: String,
    context: Context,
    status: StatusCode,
}

impl Page {
    pub fn new(template: impl Into<String>, title: &str) -> Self {
        let mut context = Context::new();
        context.insert("title", title);
        Self {
            template: template.into(),
            context,
            status: StatusCode::OK,
        }
    }

    pub fn with<T: Serialize + ?Sized>(mut self, key: &str, value: &T) -> Self {
        self.context.insert(key, value);
        self
    }

    pub fn status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    pub fn render(&self) -> Result<String, tera::Error> {
        VIEWS.render(&self.template, &self.context)
    }
}

impl IntoResponse for Page {
    fn into_response(self) -> Response {
        match self.render() {
            Ok(body) => (self.status, Html(body)).into_response(),
            Err(e) => {
                error!(template = %self.template, error = ?e, "Template render failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render page").into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn every_template_parses() {
        let names: Vec<&str> = VIEWS.get_template_names().collect();
        for (name, _) in TEMPLATES {
            assert!(names.contains(name), "missing {}", name);
        }
    }

    #[test]
    fn form_values_are_escaped() {
        let html = Page::new("genre_form.html", "Create Genre")
            .with("genre", &json!({ "name": "<script>alert(1)</script>" }))
            .render()
            .unwrap();

        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>alert"));
    }

    #[test]
    fn empty_form_renders_without_values() {
        let html = Page::new("author_form.html", "Create Author").render().unwrap();
        assert!(html.contains("<title>Create Author | Library Catalog</title>"));
        assert!(html.contains(r#"name="first_name""#));
        assert!(!html.contains("class=\"errors\""));
    }

    #[test]
    fn errors_are_listed_in_order() {
        let errors = json!([
            { "field": "name", "message": "Genre name must be specified.", "value": "" }
        ]);
        let html = Page::new("genre_form.html", "Create Genre")
            .with("genre", &json!({ "name": "" }))
            .with("errors", &errors)
            .render()
            .unwrap();

        assert!(html.contains("<li>Genre name must be specified.</li>"));
    }
}
