//! Asset pipeline for CSS and JavaScript processing.

/// Asset pipeline utilities.
pub struct AssetPipeline;

impl AssetPipeline {
    /// Generate the main CSS file.
    pub fn generate_css() -> String {
        DEFAULT_CSS.to_string()
    }

    /// Generate the main JavaScript file.
    pub fn generate_js() -> String {
        DEFAULT_JS.to_string()
    }

    /// Minify CSS using lightningcss.
    pub fn minify_css(css: &str) -> Result<String, String> {
        use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};

        let stylesheet = StyleSheet::parse(css, ParserOptions::default())
            .map_err(|e| format!("CSS parse error: {}", e))?;

        let minified = stylesheet
            .to_css(PrinterOptions {
                minify: true,
                ..Default::default()
            })
            .map_err(|e| format!("CSS minify error: {}", e))?;

        Ok(minified.code)
    }
}

// Base theme for block output. Utility classes emitted by renderers come
// from the site's own stylesheet (see `styles` in site.toml).
const DEFAULT_CSS: &str = r#"/* blockpage base theme */

:root {
  --content-max-width: 1100px;
  --background: #ffffff;
  --foreground: #111827;
  --muted: #f3f4f6;
  --muted-foreground: #6b7280;
  --border: #e5e7eb;
  --primary: #2563eb;
  --primary-foreground: #ffffff;
  --radius: 0.5rem;
}

* {
  box-sizing: border-box;
}

body {
  margin: 0;
  font-family: var(--font-sans, system-ui, -apple-system, sans-serif);
  background: var(--background);
  color: var(--foreground);
  line-height: 1.6;
}

/* Header and navigation */
.site-header {
  display: flex;
  align-items: center;
  gap: 2rem;
  padding: 1rem 1.5rem;
  border-bottom: 1px solid var(--border);
}

.site-brand {
  display: flex;
  align-items: center;
  gap: 0.75rem;
  font-weight: 700;
  font-size: 1.25rem;
  color: var(--foreground);
  text-decoration: none;
}

.site-logo {
  height: 2.5rem;
  width: auto;
}

.nav-list {
  display: flex;
  gap: 0.5rem;
  list-style: none;
  margin: 0;
  padding: 0;
}

.nav-item {
  position: relative;
}

.nav-item a {
  display: block;
  padding: 0.5rem 0.75rem;
  color: var(--muted-foreground);
  text-decoration: none;
  border-radius: var(--radius);
}

.nav-item a:hover {
  background: var(--muted);
  color: var(--foreground);
}

.nav-item.active > a {
  background: var(--primary);
  color: var(--primary-foreground);
}

.nav-children {
  display: none;
  position: absolute;
  list-style: none;
  margin: 0;
  padding: 0.5rem;
  background: var(--background);
  border: 1px solid var(--border);
  border-radius: var(--radius);
  min-width: 12rem;
  z-index: 10;
}

.nav-item:hover > .nav-children {
  display: block;
}

.menu-btn {
  display: none;
  padding: 0.5rem;
  background: var(--primary);
  color: var(--primary-foreground);
  border: none;
  border-radius: var(--radius);
  cursor: pointer;
}

/* Page */
.main {
  max-width: var(--content-max-width);
  margin: 0 auto;
  padding: 2rem 1.5rem;
}

.page-title {
  font-size: 2.25rem;
  margin: 0 0 1.5rem;
}

.page-block {
  margin-bottom: 2rem;
}

.block-title {
  font-size: 1.5rem;
  margin: 0 0 1rem;
}

/* Placeholders */
.block-placeholder,
.media-placeholder {
  padding: 1.5rem;
  border: 2px dashed var(--border);
  border-radius: var(--radius);
  background: var(--muted);
  color: var(--muted-foreground);
  text-align: center;
}

.placeholder-message {
  font-weight: 600;
  margin: 0;
}

.placeholder-hint {
  font-size: 0.875rem;
  margin: 0.5rem 0 0;
}

/* Table */
.block-table table {
  border-collapse: collapse;
}

.block-table th,
.block-table td {
  padding: 0.75rem 1rem;
  border-bottom: 1px solid var(--border);
}

.table-striped tbody tr:nth-child(even) {
  background: var(--muted);
}

.table-bordered th,
.table-bordered td {
  border: 1px solid var(--border);
}

.table-compact th,
.table-compact td {
  padding: 0.25rem 0.5rem;
}

.cell-icon {
  margin-right: 0.5rem;
}

.badge {
  display: inline-block;
  margin-left: 0.5rem;
  padding: 0.125rem 0.5rem;
  font-size: 0.75rem;
  font-weight: 600;
  border-radius: 9999px;
}

.badge-green { background: #dcfce7; color: #166534; }
.badge-red { background: #fee2e2; color: #991b1b; }
.badge-yellow { background: #fef9c3; color: #854d0e; }
.badge-blue { background: #dbeafe; color: #1e40af; }

/* Accordion */
.accordion-item {
  border: 1px solid var(--border);
  border-radius: var(--radius);
  margin-bottom: 0.5rem;
}

.accordion-title {
  padding: 1rem;
  font-weight: 600;
  cursor: pointer;
}

.accordion-content {
  padding: 0 1rem 1rem;
}

/* Marquee */
.block-marquee {
  overflow: hidden;
}

.marquee-track {
  display: flex;
  width: max-content;
  animation-name: blockpage-marquee;
  animation-timing-function: linear;
  animation-iteration-count: infinite;
}

.marquee-pause-on-hover:hover .marquee-track {
  animation-play-state: paused;
}

@keyframes blockpage-marquee {
  from { transform: translateX(0); }
  to { transform: translateX(-33.3333%); }
}

/* Testimonial */
.avatar-fallback {
  display: flex;
  align-items: center;
  justify-content: center;
  width: 3rem;
  height: 3rem;
  background: var(--primary);
  color: var(--primary-foreground);
  font-weight: 700;
}

.star-filled {
  color: #f59e0b;
}

/* Media */
.video-frame iframe,
.map-frame iframe {
  display: block;
}

@media (max-width: 768px) {
  .menu-btn {
    display: block;
  }

  .site-nav {
    display: none;
  }

  .site-nav.open {
    display: block;
  }

  .nav-list {
    flex-direction: column;
  }
}
"#;

const DEFAULT_JS: &str = r#"// blockpage runtime
(function() {
  'use strict';

  // Mobile menu toggle
  const menuBtn = document.querySelector('.menu-btn');
  const nav = document.querySelector('.site-nav');

  if (menuBtn && nav) {
    menuBtn.addEventListener('click', () => {
      nav.classList.toggle('open');
    });
  }

  // Exclusive accordions: opening one panel closes its siblings
  document.querySelectorAll('.block-accordion').forEach(accordion => {
    if (accordion.dataset.allowMultiple === 'true') return;

    const panels = accordion.querySelectorAll('.accordion-item');
    panels.forEach(panel => {
      panel.addEventListener('toggle', () => {
        if (!panel.open) return;
        panels.forEach(other => {
          if (other !== panel) other.open = false;
        });
      });
    });
  });
})();
"#;
