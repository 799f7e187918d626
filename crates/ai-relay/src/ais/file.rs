use crate::ais::pick::load_or_create;
use crate::ais::{AisClient, AisEvent, FileId, ResKind, ResRef};
use crate::{Error, Result};
use simple_fs::SPath;
use std::path::Path;

/// Returns the remote id of the knowledge file, uploading it when no remote
/// file with the same name exists.
/// - `force` is `false`, reuses the latest remote file with that name.
/// - `force` is `true`, deletes every remote file with that name, then uploads.
///
/// Returns `(FileId, has_been_uploaded)`
pub async fn load_or_upload(
	ais: &AisClient,
	file: &Path,
	force: bool,
) -> Result<(FileId, bool)> {
	let file = SPath::from_path(file)?;
	let file_name = file.file_name();
	if file_name.is_empty() {
		return Err(Error::KnowledgeFileHasNoName(file.to_str().to_string()));
	}

	let mut listed = ais.api().list_files().await?;

	// -- If force, delete the remote copies first (only when there is something to upload).
	if force {
		check_local_file(&file)?;
		for obj in listed.iter().filter(|o| o.name.as_deref() == Some(file_name)) {
			let file_id: FileId = obj.id.clone().into();
			delete(ais, file_name, &file_id).await?;
		}
		listed.retain(|o| o.name.as_deref() != Some(file_name));
	}

	let (id, uploaded) = load_or_create(ais, ResKind::File, file_name, listed, || {
		upload(ais, &file)
	})
	.await?;

	Ok((id.into(), uploaded))
}

pub async fn delete(ais: &AisClient, file_name: &str, file_id: &FileId) -> Result<()> {
	ais.api().delete_file(file_id).await?;
	ais.event_bus().send(AisEvent::Deleted(ResRef::new(
		ResKind::File,
		file_name,
		file_id.to_string(),
	)))?;

	Ok(())
}

async fn upload(ais: &AisClient, file: &SPath) -> Result<crate::ais::RemoteObj> {
	check_local_file(file)?;

	ais.event_bus().send(AisEvent::FileUploading {
		file_name: file.file_name().to_string(),
	})?;

	ais.api().upload_file(file.path()).await
}

fn check_local_file(file: &SPath) -> Result<()> {
	if file.path().is_file() {
		return Ok(());
	}

	let folder = file
		.path()
		.parent()
		.map(|p| p.to_string_lossy().to_string())
		.unwrap_or_default();
	Err(Error::KnowledgeFileNotFound {
		file_name: file.file_name().to_string(),
		folder,
	})
}

// region:    --- Tests


// endregion: --- Tests
