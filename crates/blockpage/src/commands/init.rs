//! Create a sample site.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Run the init command.
pub async fn run(config_path: &Path, yes: bool) -> Result<()> {
    tracing::info!("Initializing blockpage site...");

    let created = scaffold(Path::new("."), config_path, yes)?;
    if created.is_empty() {
        tracing::warn!("Site files already exist. Use --yes to overwrite.");
        return Ok(());
    }

    for path in &created {
        tracing::info!("Created {}", path.display());
    }

    tracing::info!("Initialization complete!");
    tracing::info!("Run 'blockpage dev' to start the development server.");

    Ok(())
}

/// Write the sample config and content under `root`.
///
/// Existing files are kept unless `overwrite` is set. Returns the files
/// written.
fn scaffold(root: &Path, config_path: &Path, overwrite: bool) -> Result<Vec<PathBuf>> {
    let content_dir = root.join("content");
    fs::create_dir_all(content_dir.join("profil")).context("Failed to create content directory")?;
    fs::create_dir_all(root.join("public")).context("Failed to create public directory")?;

    let files = [
        (root.join(config_path), DEFAULT_CONFIG),
        (content_dir.join("index.yaml"), DEFAULT_INDEX),
        (content_dir.join("profil/index.yaml"), DEFAULT_PROFILE),
        (content_dir.join("profil/guru.json"), DEFAULT_TEACHERS),
        (content_dir.join("kontak.yaml"), DEFAULT_CONTACT),
    ];

    let mut created = Vec::new();
    for (path, contents) in files {
        if path.exists() && !overwrite {
            continue;
        }
        fs::write(&path, contents)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        created.push(path);
    }

    Ok(created)
}

const DEFAULT_CONFIG: &str = r#"# blockpage configuration

[site]
title = "SMA Negeri 1 Harapan"

# Base URL (for deployment); an absolute URL also enables sitemap.xml
base_url = "/"

# favicon = "/favicon.ico"
# logo = "/logo.png"

# Extra stylesheets copied into assets/
styles = []

[content]
# Page documents (.yaml, .yml, .json)
dir = "content"

# Static files served as-is and copied into the build
public = "public"

[build]
output = "dist"
minify = true
"#;

const DEFAULT_INDEX: &str = r#"title: Beranda
description: Selamat datang di SMA Negeri 1 Harapan
order: 1
blocks:
  - type: marquee
    text: Pendaftaran peserta didik baru tahun ajaran 2026/2027 telah dibuka
    speed: normal
    variant: primary

  - type: cta
    title: Bergabung bersama kami
    description: Sekolah berprestasi dengan lingkungan belajar yang nyaman.
    buttonText: Daftar sekarang
    buttonLink: /ppdb/
    variant: gradient

  - type: features
    title: Mengapa memilih kami
    columns: 3
    items:
      - icon: "🏆"
        title: Berprestasi
        description: Juara olimpiade sains tingkat provinsi.
      - icon: "📚"
        title: Perpustakaan digital
        description: Ribuan buku dan jurnal dapat diakses siswa.
      - icon: "⚽"
        title: Ekstrakurikuler
        description: Lebih dari 20 kegiatan pilihan.

  - type: divider
    label: Berita terbaru

  - type: grid
    columns: 3
    items:
      - title: Upacara Hari Pendidikan
        description: Seluruh warga sekolah mengikuti upacara.
        link: /berita/hardiknas/
      - title: Pentas Seni
        description: Penampilan siswa kelas XII.
      - title: Kunjungan Industri
        description: Siswa belajar langsung di lapangan.

  - type: testimonial
    name: Rina Wulandari
    role: Alumni 2020
    content: Guru-guru di sini membimbing dengan sabar hingga saya diterima di universitas impian.
    rating: 5

  - type: video
    url: https://www.youtube.com/watch?v=dQw4w9WgXcQ
    title: Profil sekolah
"#;

const DEFAULT_PROFILE: &str = r#"title: Profil
order: 2
blocks:
  - type: quote
    text: Ing ngarsa sung tuladha, ing madya mangun karsa, tut wuri handayani.
    author: Ki Hajar Dewantara
    variant: large

  - type: list
    title: Misi
    style: check
    items:
      - Menyelenggarakan pembelajaran yang aktif dan menyenangkan
      - Menumbuhkan budi pekerti luhur
      - Mengembangkan potensi akademik dan non-akademik

  - type: accordion
    items:
      - title: Sejarah
        content: Didirikan pada tahun **1965** sebagai sekolah menengah pertama di kecamatan.
      - title: Fasilitas
        content: Laboratorium, perpustakaan, lapangan olahraga dan masjid.
"#;

const DEFAULT_TEACHERS: &str = r#"{
  "title": "Guru dan Staf",
  "order": 3,
  "blocks": [
    {
      "type": "table",
      "caption": "Daftar guru",
      "variant": "striped",
      "headers": ["Nama", "Mata pelajaran", "Status"],
      "rows": [
        ["Budi Santoso", "Matematika", {"text": "Aktif", "badge": "PNS", "badgeColor": "green"}],
        ["Siti Aminah", {"icon": "🔬", "text": "Biologi"}, {"text": "Cuti", "badge": "Cuti", "badgeColor": "yellow"}]
      ]
    }
  ]
}
"#;

const DEFAULT_CONTACT: &str = r#"title: Kontak
order: 4
blocks:
  - type: map
    title: Lokasi sekolah
    address: Jl. Pendidikan No. 1, Bandung
    zoom: 16
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use blockpage_blocks::{builtin_registry, compose, ComposeSummary};
    use blockpage_content::discover_pages;
    use tempfile::tempdir;

    #[test]
    fn scaffolds_renderable_site() {
        let temp = tempdir().unwrap();

        let created = scaffold(temp.path(), Path::new("site.toml"), false).unwrap();

        assert_eq!(created.len(), 5);
        assert!(temp.path().join("site.toml").exists());

        let pages = discover_pages(&temp.path().join("content")).unwrap();
        assert_eq!(pages.len(), 4);

        for page in &pages {
            let summary = ComposeSummary::of(&compose(builtin_registry(), &page.doc.blocks));
            assert_eq!(summary.unsupported + summary.failed, 0, "{:?}", page.relative_path);
        }
    }

    #[test]
    fn keeps_existing_files_without_overwrite() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("site.toml"), "[site]\ntitle = \"Mine\"\n").unwrap();

        let created = scaffold(temp.path(), Path::new("site.toml"), false).unwrap();

        assert_eq!(created.len(), 4);
        assert_eq!(
            fs::read_to_string(temp.path().join("site.toml")).unwrap(),
            "[site]\ntitle = \"Mine\"\n"
        );

        let again = scaffold(temp.path(), Path::new("site.toml"), true).unwrap();
        assert_eq!(again.len(), 5);
    }
}
