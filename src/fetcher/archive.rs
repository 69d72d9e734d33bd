//! Archive extraction for downloaded JDK packages.
//!
//! Downloads land in a temp file with no useful extension, so the format is
//! sniffed from magic bytes: zip when the file starts with `PK\x03\x04`,
//! gzipped tar otherwise. Both paths reject entries that would escape the
//! destination directory.

use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::{Component, Path, PathBuf};

use anyhow::{bail, Context, Result};
use flate2::read::GzDecoder;

const ZIP_MAGIC: [u8; 4] = [0x50, 0x4b, 0x03, 0x04];

/// Extract `src` into `dest` and return the extracted root directory.
///
/// JDK archives wrap their content in a single top-level directory (for
/// example `jdk-17.0.2+8/`); the returned path is `dest` joined with that
/// first component.
pub fn extract_archive(src: &Path, dest: &Path) -> Result<PathBuf> {
    let mut file = File::open(src)
        .with_context(|| format!("failed to open archive {}", src.display()))?;

    let mut magic = [0u8; 4];
    let n = file.read(&mut magic).context("failed to read archive header")?;
    file.seek(SeekFrom::Start(0))?;

    std::fs::create_dir_all(dest)
        .with_context(|| format!("failed to create {}", dest.display()))?;

    let root = if n == 4 && magic == ZIP_MAGIC {
        extract_zip(file, dest)?
    } else {
        extract_tar_gz(file, dest)?
    };

    let root = root.with_context(|| format!("archive {} was empty", src.display()))?;
    Ok(dest.join(root))
}

/// Unpack a zip archive, returning the first top-level path component seen.
fn extract_zip(file: File, dest: &Path) -> Result<Option<PathBuf>> {
    let mut archive = zip::ZipArchive::new(BufReader::new(file)).context("invalid zip archive")?;
    let mut root: Option<PathBuf> = None;

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).context("corrupt zip entry")?;
        let relative = match entry.enclosed_name() {
            Some(name) => name.to_owned(),
            None => bail!("zip entry {:?} escapes the destination", entry.name()),
        };

        if root.is_none() {
            root = first_component(&relative);
        }

        let out_path = dest.join(&relative);
        if entry.is_dir() {
            std::fs::create_dir_all(&out_path)?;
            continue;
        }

        if let Some(parent) = out_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut out = File::create(&out_path)
            .with_context(|| format!("failed to create {}", out_path.display()))?;
        std::io::copy(&mut entry, &mut out)?;

        #[cfg(unix)]
        if let Some(mode) = entry.unix_mode() {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&out_path, std::fs::Permissions::from_mode(mode))?;
        }
    }

    Ok(root)
}

/// Unpack a gzipped tar archive, returning the first top-level path component.
fn extract_tar_gz(file: File, dest: &Path) -> Result<Option<PathBuf>> {
    let decoder = GzDecoder::new(BufReader::new(file));
    let mut archive = tar::Archive::new(decoder);
    archive.set_preserve_permissions(true);
    let mut root: Option<PathBuf> = None;

    for entry in archive.entries().context("invalid tar archive")? {
        let mut entry = entry.context("corrupt tar entry")?;
        let relative = entry.path().context("unreadable tar entry path")?.into_owned();

        if !is_safe_relative(&relative) {
            bail!("tar entry {:?} escapes the destination", relative);
        }

        if root.is_none() {
            root = first_component(&relative);
        }

        entry
            .unpack_in(dest)
            .with_context(|| format!("failed to unpack {:?}", relative))?;
    }

    Ok(root)
}

fn is_safe_relative(path: &Path) -> bool {
    !path.is_absolute()
        && !path
            .components()
            .any(|c| matches!(c, Component::ParentDir))
}

fn first_component(path: &Path) -> Option<PathBuf> {
    path.components().next().map(|c| PathBuf::from(c.as_os_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_zip(path: &Path) {
        let file = File::create(path).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        let options = zip::write::SimpleFileOptions::default();

        writer.add_directory("jdk-17.0.2+8/bin/", options).unwrap();
        writer
            .start_file("jdk-17.0.2+8/bin/java", options)
            .unwrap();
        writer.write_all(b"launcher").unwrap();
        writer.start_file("jdk-17.0.2+8/release", options).unwrap();
        writer.write_all(b"JAVA_VERSION=\"17.0.2\"").unwrap();
        writer.finish().unwrap();
    }

    fn write_tar_gz(path: &Path) {
        let file = File::create(path).unwrap();
        let encoder = flate2::write::GzEncoder::new(file, flate2::Compression::default());
        let mut builder = tar::Builder::new(encoder);

        let mut header = tar::Header::new_gnu();
        header.set_size(8);
        header.set_mode(0o755);
        header.set_cksum();
        builder
            .append_data(&mut header, "jdk-17.0.2+8/bin/java", &b"launcher"[..])
            .unwrap();
        builder.into_inner().unwrap().finish().unwrap();
    }

    #[test]
    fn extracts_zip_and_returns_wrapped_root() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("jdk.bin");
        write_zip(&archive);

        let dest = temp.path().join("out");
        let root = extract_archive(&archive, &dest).unwrap();

        assert_eq!(root, dest.join("jdk-17.0.2+8"));
        assert!(root.join("bin").join("java").is_file());
        assert!(root.join("release").is_file());
    }

    #[test]
    fn extracts_tar_gz_and_returns_wrapped_root() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("jdk.bin");
        write_tar_gz(&archive);

        let dest = temp.path().join("out");
        let root = extract_archive(&archive, &dest).unwrap();

        assert_eq!(root, dest.join("jdk-17.0.2+8"));
        assert!(root.join("bin").join("java").is_file());
    }

    #[test]
    fn format_is_sniffed_not_taken_from_extension() {
        let temp = TempDir::new().unwrap();
        // A zip payload behind a .tar.gz name still extracts as zip.
        let archive = temp.path().join("jdk.tar.gz");
        write_zip(&archive);

        let dest = temp.path().join("out");
        let root = extract_archive(&archive, &dest).unwrap();
        assert!(root.join("release").is_file());
    }

    #[test]
    fn tar_entry_with_parent_traversal_is_rejected() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("evil.bin");

        let file = File::create(&archive).unwrap();
        let encoder = flate2::write::GzEncoder::new(file, flate2::Compression::default());
        let mut builder = tar::Builder::new(encoder);

        // The builder API refuses `..` in paths, so write the name field
        // directly to forge what a hostile archive would carry.
        let mut header = tar::Header::new_gnu();
        header.set_size(4);
        header.set_mode(0o644);
        {
            let gnu = header.as_gnu_mut().unwrap();
            let name = b"../escape";
            gnu.name[..name.len()].copy_from_slice(name);
        }
        header.set_cksum();
        builder.append(&header, &b"oops"[..]).unwrap();
        builder.into_inner().unwrap().finish().unwrap();

        let dest = temp.path().join("out");
        let err = extract_archive(&archive, &dest).unwrap_err();
        assert!(err.to_string().contains("escapes"));
        assert!(!temp.path().join("escape").exists());
    }

    #[test]
    fn garbage_input_is_an_error() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("noise.bin");
        std::fs::write(&archive, b"definitely not an archive").unwrap();

        let dest = temp.path().join("out");
        assert!(extract_archive(&archive, &dest).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn zip_unix_mode_is_preserved() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("jdk.bin");

        let file = File::create(&archive).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        let options = zip::write::SimpleFileOptions::default().unix_permissions(0o755);
        writer.start_file("jdk/bin/java", options).unwrap();
        writer.write_all(b"launcher").unwrap();
        writer.finish().unwrap();

        let dest = temp.path().join("out");
        let root = extract_archive(&archive, &dest).unwrap();

        let mode = std::fs::metadata(root.join("bin").join("java"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o755);
    }
}
