//! Template engine for rendering site pages.

use minijinja::{context, Environment};

/// A navigation item.
#[derive(Debug, Clone, serde::Serialize)]
pub struct NavItem {
    /// Display title
    pub title: String,
    /// URL path
    pub path: String,
    /// Child items
    pub children: Vec<NavItem>,
    /// Whether this is the active page
    pub active: bool,
}

/// Context for rendering a page template.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Context {
    /// Page title
    pub title: String,
    /// Site title
    pub site_title: String,
    /// Page description for the meta tag
    pub description: Option<String>,
    /// Composed block HTML
    pub content: String,
    /// Navigation items
    pub nav: Vec<NavItem>,
    /// Base URL
    pub base_url: String,
    /// Favicon URL
    pub favicon: Option<String>,
    /// Logo image URL
    pub logo: Option<String>,
    /// Paths to CSS stylesheets to include
    pub styles: Vec<String>,
    /// Inline scripts to include after the page script
    pub scripts: Vec<String>,
}

/// Template engine using minijinja.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create a new template engine with default templates.
    pub fn new() -> Self {
        let mut env = Environment::new();

        env.add_template_owned("base.html".to_string(), BASE_TEMPLATE.to_string())
            .expect("Failed to add base template");

        env.add_template_owned("page.html".to_string(), PAGE_TEMPLATE.to_string())
            .expect("Failed to add page template");

        env.add_template_owned("nav.html".to_string(), NAV_TEMPLATE.to_string())
            .expect("Failed to add nav template");

        env.add_template_owned("404.html".to_string(), NOT_FOUND_TEMPLATE.to_string())
            .expect("Failed to add 404 template");

        Self { env }
    }

    /// Render a page using the specified template.
    pub fn render_page(
        &self,
        template: &str,
        context: &Context,
    ) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template(template)?;

        tmpl.render(context! {
            title => &context.title,
            site_title => &context.site_title,
            description => &context.description,
            content => &context.content,
            nav => &context.nav,
            base_url => &context.base_url,
            favicon => &context.favicon,
            logo => &context.logo,
            styles => &context.styles,
            scripts => &context.scripts,
        })
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

const BASE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="id">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{{ title }} - {{ site_title }}</title>
  {% if description %}<meta name="description" content="{{ description }}">
  {% endif %}{% if favicon %}<link rel="icon" href="{{ favicon }}">
  {% endif %}{% for style in styles %}<link rel="stylesheet" href="{{ style }}">
  {% endfor %}<link rel="stylesheet" href="{{ base_url }}assets/main.css">
</head>
<body>
  <header class="site-header">
    <button class="menu-btn" type="button" aria-label="Menu">&#9776;</button>
    <a href="{{ base_url }}" class="site-brand">
      {% if logo %}<img src="{{ logo }}" alt="{{ site_title }}" class="site-logo">{% endif %}
      <span class="site-title">{{ site_title }}</span>
    </a>
    <nav class="site-nav">
      {% include "nav.html" %}
    </nav>
  </header>
  <main class="main">
    {% block content %}{% endblock %}
  </main>
  <script src="{{ base_url }}assets/main.js"></script>
  {% for script in scripts %}
  <script>{{ script | safe }}</script>
  {% endfor %}
</body>
</html>"##;

const PAGE_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<article class="page">
  <h1 class="page-title">{{ title }}</h1>
  <div class="page-blocks">
    {{ content | safe }}
  </div>
</article>
{% endblock %}"##;

const NOT_FOUND_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<article class="page page-not-found">
  <h1 class="page-title">{{ title }}</h1>
  <p>The page you are looking for does not exist.</p>
  <p><a href="{{ base_url }}">Back to home</a></p>
</article>
{% endblock %}"##;

const NAV_TEMPLATE: &str = r##"<ul class="nav-list">
{% for item in nav %}
  <li class="nav-item{% if item.active %} active{% endif %}">
    <a href="{{ item.path }}">{{ item.title }}</a>
    {% if item.children %}
    <ul class="nav-children">
      {% for child in item.children %}
      <li class="nav-item{% if child.active %} active{% endif %}">
        <a href="{{ child.path }}">{{ child.title }}</a>
      </li>
      {% endfor %}
    </ul>
    {% endif %}
  </li>
{% endfor %}
</ul>"##;

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> Context {
        Context {
            title: "Beranda".to_string(),
            site_title: "SMA Negeri 1".to_string(),
            description: None,
            content: "<p>Hello world</p>".to_string(),
            nav: vec![],
            base_url: "/".to_string(),
            favicon: None,
            logo: None,
            styles: vec![],
            scripts: vec![],
        }
    }

    #[test]
    fn renders_basic_page() {
        let engine = TemplateEngine::new();

        let html = engine.render_page("page.html", &context()).unwrap();

        assert!(html.contains("<title>Beranda - SMA Negeri 1</title>"));
        assert!(html.contains("<p>Hello world</p>"));
        assert!(!html.contains("rel=\"icon\""));
    }

    #[test]
    fn renders_site_branding() {
        let engine = TemplateEngine::new();
        let ctx = Context {
            favicon: Some("/favicon.png".to_string()),
            logo: Some("/logo.png".to_string()),
            description: Some("Sekolah unggulan".to_string()),
            ..context()
        };

        let html = engine.render_page("page.html", &ctx).unwrap();

        assert!(html.contains(r#"<link rel="icon""#));
        assert!(html.contains("favicon.png"));
        assert!(html.contains("logo.png"));
        assert!(html.contains("Sekolah unggulan"));
    }

    #[test]
    fn renders_navigation() {
        let engine = TemplateEngine::new();
        let ctx = Context {
            nav: vec![
                NavItem {
                    title: "Beranda".to_string(),
                    path: "/".to_string(),
                    children: vec![],
                    active: true,
                },
                NavItem {
                    title: "Profil".to_string(),
                    path: "/profil/".to_string(),
                    children: vec![NavItem {
                        title: "Visi Misi".to_string(),
                        path: "/profil/visi-misi/".to_string(),
                        children: vec![],
                        active: false,
                    }],
                    active: false,
                },
            ],
            ..context()
        };

        let html = engine.render_page("page.html", &ctx).unwrap();

        assert!(html.contains("nav-item active"));
        assert!(html.contains("Profil"));
        assert!(html.contains("visi-misi"));
    }

    #[test]
    fn includes_inline_scripts() {
        let engine = TemplateEngine::new();
        let ctx = Context {
            scripts: vec!["console.log('reload')".to_string()],
            ..context()
        };

        let html = engine.render_page("page.html", &ctx).unwrap();

        assert!(html.contains("console.log('reload')"));
    }

    #[test]
    fn renders_not_found_page() {
        let engine = TemplateEngine::new();

        let html = engine.render_page("404.html", &context()).unwrap();

        assert!(html.contains("page-not-found"));
    }
}
