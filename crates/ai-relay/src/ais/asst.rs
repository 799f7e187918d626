use crate::ais::pick::load_or_create as pick_or_create;
use crate::ais::{AisClient, AisEvent, AsstId, AsstSpec, ResKind, ResRef, VectorStoreId};
use crate::Result;

// region:    --- Asst CRUD

/// Reuses the assistant named `spec.name` (the latest one on name collision)
/// and syncs its model, temperature and instructions, or creates it.
/// - `recreate` is `true`, every assistant with that name is deleted first.
///
/// Returns `(AsstId, has_been_created)`
pub async fn load_or_create(
	ais: &AisClient,
	spec: &AsstSpec,
	recreate: bool,
) -> Result<(AsstId, bool)> {
	let mut listed = ais.api().list_assts().await?;

	// -- Delete assts if recreate
	if recreate {
		for obj in listed
			.iter()
			.filter(|o| o.name.as_deref() == Some(spec.name.as_str()))
		{
			delete(ais, &spec.name, &obj.id.clone().into()).await?;
		}
		listed.retain(|o| o.name.as_deref() != Some(spec.name.as_str()));
	}

	// -- Load or create
	let (asst_id, created) =
		pick_or_create(ais, ResKind::Asst, &spec.name, listed, || {
			ais.api().create_asst(spec)
		})
		.await?;
	let asst_id: AsstId = asst_id.into();

	// -- Sync the config when loaded
	if !created {
		sync_config(ais, &asst_id, spec).await?;
	}

	Ok((asst_id, created))
}

/// Pushes model, temperature and instructions onto an existing assistant.
pub async fn sync_config(ais: &AisClient, asst_id: &AsstId, spec: &AsstSpec) -> Result<()> {
	ais.api().update_asst(asst_id, spec).await?;

	ais.event_bus().send(AisEvent::AsstSynced(ResRef::new(
		ResKind::Asst,
		&spec.name,
		asst_id.to_string(),
	)))?;

	Ok(())
}

/// Makes `vector_store_id` the only vector store of the assistant `file_search` tool.
pub async fn attach_vector_store(
	ais: &AisClient,
	asst_id: &AsstId,
	vector_store_id: &VectorStoreId,
) -> Result<()> {
	ais.api()
		.set_asst_vector_stores(asst_id, std::slice::from_ref(vector_store_id))
		.await?;

	ais.event_bus().send(AisEvent::VectorStoreAttached {
		asst_id: asst_id.clone(),
		vector_store_id: vector_store_id.clone(),
	})?;

	Ok(())
}

pub async fn delete(ais: &AisClient, name: &str, asst_id: &AsstId) -> Result<()> {
	ais.api().delete_asst(asst_id).await?;

	ais.event_bus().send(AisEvent::Deleted(ResRef::new(
		ResKind::Asst,
		name,
		asst_id.to_string(),
	)))?;

	Ok(())
}

// endregion: --- Asst CRUD

// region:    --- Tests

#[cfg(test)]
mod tests {
	use super::*;
	use crate::ais::mock::MockAis;
	use crate::ais::RemoteObj;
	use crate::event::EventBus;

	fn spec() -> AsstSpec {
		AsstSpec {
			name: "Schedule Assistant".to_string(),
			model: "gpt-4o-mini".to_string(),
			instructions: Some("Answer questions about the schedule.".to_string()),
			temperature: Some(0.2),
		}
	}

	#[tokio::test]
	async fn creates_when_missing() {
		let mock = MockAis::default();
		mock.state().assts = vec![RemoteObj::new("asst-other", "Other", 1)];
		let ais = AisClient::with_api(mock.clone(), EventBus::new());

		let (asst_id, created) = load_or_create(&ais, &spec(), false).await.unwrap();

		assert!(created);
		let st = mock.state();
		assert_eq!(st.asst_specs.get(asst_id.as_str()), Some(&spec()));
		assert!(st.calls_starting_with("update_asst").is_empty());
	}

	#[tokio::test]
	async fn reuses_latest_and_syncs_config() {
		let mock = MockAis::default();
		mock.state().assts = vec![
			RemoteObj::new("asst-new", "Schedule Assistant", 300),
			RemoteObj::new("asst-old", "Schedule Assistant", 100),
		];
		let ais = AisClient::with_api(mock.clone(), EventBus::new());

		let (asst_id, created) = load_or_create(&ais, &spec(), false).await.unwrap();

		assert!(!created);
		assert_eq!(asst_id.as_str(), "asst-new");
		let st = mock.state();
		assert_eq!(st.calls, vec!["update_asst asst-new".to_string()]);
		assert_eq!(st.asst_specs.get("asst-new"), Some(&spec()));
	}

	#[tokio::test]
	async fn recreate_deletes_all_same_named() {
		let mock = MockAis::default();
		mock.state().assts = vec![
			RemoteObj::new("asst-a", "Schedule Assistant", 100),
			RemoteObj::new("asst-b", "Schedule Assistant", 200),
		];
		let ais = AisClient::with_api(mock.clone(), EventBus::new());

		let (asst_id, created) = load_or_create(&ais, &spec(), true).await.unwrap();

		assert!(created);
		let st = mock.state();
		assert_eq!(
			st.calls,
			vec![
				"delete_asst asst-a".to_string(),
				"delete_asst asst-b".to_string(),
				"create_asst Schedule Assistant".to_string(),
			]
		);
		assert_eq!(st.assts.len(), 1);
		assert_eq!(st.assts[0].id, *asst_id);
	}

	#[tokio::test]
	async fn attach_vector_store_replaces_resources() {
		let mock = MockAis::default();
		let ais = AisClient::with_api(mock.clone(), EventBus::new());
		let asst_id: AsstId = "asst-1".to_string().into();
		let vs_id: VectorStoreId = "vs-1".to_string().into();

		attach_vector_store(&ais, &asst_id, &vs_id).await.unwrap();

		assert_eq!(
			mock.state().asst_vector_stores.get("asst-1"),
			Some(&vec![vs_id])
		);
	}
}

// endregion: --- Tests
