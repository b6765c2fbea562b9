//! Tests for the folder synchronizer against a temporary students root.

use std::fs;

use tempfile::TempDir;

use crate::{Category, StudentFolders};

fn folders() -> (StudentFolders, TempDir) {
  let tmp = TempDir::new().expect("temp dir");
  let folders = StudentFolders::new(tmp.path().join("students"));
  (folders, tmp)
}

// ─── create ──────────────────────────────────────────────────────────────────

#[test]
fn create_makes_directory_and_mandatory_subfolders() {
  let (f, _tmp) = folders();

  let path = f.create(1, "João da Silva").unwrap();
  assert_eq!(path, f.root().join("1_Joao_da_Silva"));
  assert!(path.is_dir());
  assert!(path.join("contrato").is_dir());
  assert!(path.join("documentos").is_dir());
}

#[test]
fn create_is_idempotent() {
  let (f, _tmp) = folders();

  let first = f.create(1, "Ana").unwrap();
  fs::write(first.join("documentos").join("x.txt"), b"keep me").unwrap();

  let second = f.create(1, "Ana").unwrap();
  assert_eq!(first, second);
  assert!(second.join("documentos").join("x.txt").exists());
}

// ─── rename ──────────────────────────────────────────────────────────────────

#[test]
fn rename_moves_directory() {
  let (f, _tmp) = folders();

  let old = f.create(2, "Ana Lima").unwrap();
  fs::write(old.join("contrato").join("c.pdf"), b"pdf").unwrap();

  let new = f.rename(2, "Ana Lima", "Ana Souza");
  assert_eq!(new, f.root().join("2_Ana_Souza"));
  assert!(new.join("contrato").join("c.pdf").exists());
  assert!(!old.exists());
}

#[test]
fn rename_with_unchanged_token_is_noop() {
  let (f, _tmp) = folders();

  let old = f.create(3, "Bruno").unwrap();
  // Different surface form, same normalized token.
  let kept = f.rename(3, "Bruno", "  Bruno ");
  assert_eq!(kept, old);
  assert!(old.is_dir());
}

#[test]
fn rename_of_missing_source_returns_old_path() {
  let (f, _tmp) = folders();

  // Never created on disk: treated as already consistent, not an error.
  let kept = f.rename(4, "Carla", "Carla Dias");
  assert_eq!(kept, f.root().join("4_Carla"));
  assert!(!kept.exists());
}

// ─── remove ──────────────────────────────────────────────────────────────────

#[test]
fn remove_deletes_whole_subtree() {
  let (f, _tmp) = folders();

  let path = f.create(5, "Davi").unwrap();
  fs::write(path.join("documentos").join("rg.png"), b"img").unwrap();

  f.remove(&path).unwrap();
  assert!(!path.exists());
}

#[test]
fn remove_of_missing_path_is_silent() {
  let (f, _tmp) = folders();
  f.remove(&f.root().join("99_Nobody")).unwrap();
}

// ─── categories and attachments ──────────────────────────────────────────────

#[test]
fn category_dir_is_created_lazily() {
  let (f, _tmp) = folders();

  let path = f.create(6, "Elisa").unwrap();
  assert!(!path.join("laudo").exists());

  let dir = f.category_dir(&path, Category::MedicalReport).unwrap();
  assert_eq!(dir, path.join("laudo"));
  assert!(dir.is_dir());
}

#[test]
fn attach_uses_deterministic_name() {
  let (f, tmp) = folders();

  let path = f.create(7, "João Pedro").unwrap();
  let source = tmp.path().join("exame.pdf");
  fs::write(&source, b"report").unwrap();

  let stored = f
    .attach(&path, Category::MedicalReport, "João Pedro", "2º Ano", &source)
    .unwrap();
  assert_eq!(stored, path.join("laudo").join("laudo_Joao_Pedro_2_Ano.pdf"));
  assert_eq!(fs::read(&stored).unwrap(), b"report");
}

#[test]
fn attach_never_overwrites() {
  let (f, tmp) = folders();

  let path = f.create(8, "Lia").unwrap();
  let source = tmp.path().join("foto.jpg");
  fs::write(&source, b"one").unwrap();

  let first = f
    .attach(&path, Category::Photo, "Lia", "1º Ano", &source)
    .unwrap();
  fs::write(&source, b"two").unwrap();
  let second = f
    .attach(&path, Category::Photo, "Lia", "1º Ano", &source)
    .unwrap();

  assert_ne!(first, second);
  assert_eq!(fs::read(&first).unwrap(), b"one");
  assert_eq!(fs::read(&second).unwrap(), b"two");
}
