use crate::ais::pick::load_or_create as pick_or_create;
use crate::ais::{AisClient, AisEvent, FileId, ResKind, VectorStoreId};
use crate::Result;

/// Reuses the vector store named `name` (the latest one on name collision), or
/// creates it with `file_id` in it.
/// A reused store gets `file_id` added when it does not hold it yet.
///
/// Returns `(VectorStoreId, has_been_created)`
pub async fn load_or_create(
	ais: &AisClient,
	name: &str,
	file_id: &FileId,
) -> Result<(VectorStoreId, bool)> {
	let listed = ais.api().list_vector_stores().await?;

	let (vs_id, created) = pick_or_create(ais, ResKind::VectorStore, name, listed, || {
		ais.api()
			.create_vector_store(name, std::slice::from_ref(file_id))
	})
	.await?;
	let vs_id: VectorStoreId = vs_id.into();

	if !created {
		ensure_file(ais, &vs_id, file_id).await?;
	}

	Ok((vs_id, created))
}

/// Adds `file_id` to the store unless it is already there.
///
/// Returns true if the file was added.
pub async fn ensure_file(
	ais: &AisClient,
	vector_store_id: &VectorStoreId,
	file_id: &FileId,
) -> Result<bool> {
	let file_ids = ais.api().list_vector_store_files(vector_store_id).await?;
	if file_ids.contains(file_id) {
		return Ok(false);
	}

	ais.api().add_vector_store_file(vector_store_id, file_id).await?;
	ais.event_bus().send(AisEvent::VectorStoreFileAdded {
		vector_store_id: vector_store_id.clone(),
		file_id: file_id.clone(),
	})?;

	Ok(true)
}

// region:    --- Tests


// endregion: --- Tests
