//! Reuse-or-create selection shared by files, assistants and vector stores.
//!
//! Given a name, the listed remote objects are filtered by exact name match:
//! - none match, the caller creates one,
//! - one matches, it is reused,
//! - several match, the one with the latest `created_at` is reused
//!   (ties keep the first one in listing order).

use crate::ais::{AisClient, AisEvent, RemoteObj, ResKind, ResRef};
use crate::Result;
use std::future::Future;

#[derive(Debug, PartialEq)]
pub enum Pick {
	Missing,
	Single(RemoteObj),
	Latest { obj: RemoteObj, count: usize },
}

pub fn pick_by_name(objs: Vec<RemoteObj>, name: &str) -> Pick {
	let mut matches = objs
		.into_iter()
		.filter(|o| o.name.as_deref() == Some(name));

	let Some(mut latest) = matches.next() else {
		return Pick::Missing;
	};

	let mut count = 1;
	for obj in matches {
		count += 1;
		if obj.created_at > latest.created_at {
			latest = obj;
		}
	}

	if count == 1 {
		Pick::Single(latest)
	} else {
		Pick::Latest { obj: latest, count }
	}
}

/// Picks among `listed`, or calls `create` when nothing matches.
///
/// Returns `(id, created)`.
pub async fn load_or_create<F, Fut>(
	ais: &AisClient,
	kind: ResKind,
	name: &str,
	listed: Vec<RemoteObj>,
	create: F,
) -> Result<(String, bool)>
where
	F: FnOnce() -> Fut,
	Fut: Future<Output = Result<RemoteObj>>,
{
	match pick_by_name(listed, name) {
		Pick::Missing => {
			let obj = create().await?;
			ais.event_bus()
				.send(AisEvent::Created(ResRef::new(kind, name, &obj.id)))?;
			Ok((obj.id, true))
		}
		Pick::Single(obj) => {
			ais.event_bus()
				.send(AisEvent::Loaded(ResRef::new(kind, name, &obj.id)))?;
			Ok((obj.id, false))
		}
		Pick::Latest { obj, count } => {
			ais.event_bus().send(AisEvent::LoadedLatest {
				res_ref: ResRef::new(kind, name, &obj.id),
				created_at: obj.created_at,
				count,
			})?;
			Ok((obj.id, false))
		}
	}
}

// region:    --- Tests

#[cfg(test)]
mod tests {
	use super::*;
	use crate::event::{Event, EventBus};

	fn obj(id: &str, name: &str, created_at: i64) -> RemoteObj {
		RemoteObj::new(id, name, created_at)
	}

	#[test]
	fn pick_missing_when_no_name_matches() {
		let objs = vec![obj("a", "other", 1), obj("b", "Other", 2)];
		assert_eq!(pick_by_name(objs, "target"), Pick::Missing);
		assert_eq!(pick_by_name(vec![], "target"), Pick::Missing);
	}

	#[test]
	fn pick_ignores_unnamed_objects() {
		let objs = vec![RemoteObj {
			id: "a".into(),
			name: None,
			created_at: 10,
		}];
		assert_eq!(pick_by_name(objs, ""), Pick::Missing);
	}

	#[test]
	fn pick_single_match() {
		let objs = vec![obj("a", "other", 5), obj("b", "target", 1)];
		assert_eq!(pick_by_name(objs, "target"), Pick::Single(obj("b", "target", 1)));
	}

	#[test]
	fn pick_latest_among_duplicates() {
		let objs = vec![
			obj("old", "target", 100),
			obj("x", "other", 999),
			obj("new", "target", 300),
			obj("mid", "target", 200),
		];
		assert_eq!(
			pick_by_name(objs, "target"),
			Pick::Latest {
				obj: obj("new", "target", 300),
				count: 3
			}
		);
	}

	#[test]
	fn pick_tie_keeps_first_listed() {
		let objs = vec![obj("first", "target", 7), obj("second", "target", 7)];
		assert_eq!(
			pick_by_name(objs, "target"),
			Pick::Latest {
				obj: obj("first", "target", 7),
				count: 2
			}
		);
	}

	#[tokio::test]
	async fn load_or_create_calls_create_only_when_missing() {
		let bus = EventBus::new();
		let mut rx = bus.subscribe().unwrap();
		let ais = AisClient::with_api(crate::ais::mock::MockAis::default(), bus);

		let (id, created) =
			load_or_create(&ais, ResKind::File, "kb.pdf", vec![], || async {
				Ok::<_, crate::Error>(obj("file-new", "kb.pdf", 1))
			})
			.await
			.unwrap();
		assert_eq!(id, "file-new");
		assert!(created);
		assert!(matches!(
			rx.recv().await.unwrap(),
			Event::Ais(AisEvent::Created(ResRef { kind: ResKind::File, .. }))
		));

		let listed = vec![obj("f1", "kb.pdf", 1), obj("f2", "kb.pdf", 2)];
		// create fails, so an Ok proves it was not called
		let (id, created) = load_or_create(&ais, ResKind::File, "kb.pdf", listed, || async {
			Err::<RemoteObj, _>(crate::Error::NoAsstMessageInThread)
		})
		.await
		.unwrap();
		assert_eq!(id, "f2");
		assert!(!created);
		match rx.recv().await.unwrap() {
			Event::Ais(AisEvent::LoadedLatest {
				res_ref,
				created_at,
				count,
			}) => {
				assert_eq!(res_ref.id, "f2");
				assert_eq!(created_at, 2);
				assert_eq!(count, 2);
			}
			other => panic!("unexpected event {other:?}"),
		}
	}
}

// endregion: --- Tests
