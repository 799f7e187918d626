use crate::ais::{FileId, MsgInfo, MsgRole};
use async_openai::types::{
	CreateMessageRequest, CreateMessageRequestContent, MessageAttachment,
	MessageAttachmentTool, MessageContent, MessageObject, MessageRole,
};

// region:    --- Message Constructors

/// User message, with the knowledge file attached for the `file_search` tool when given.
pub fn user_msg(
	content: impl Into<String>,
	attachment: Option<&FileId>,
) -> CreateMessageRequest {
	let attachments = attachment.map(|file_id| {
		vec![MessageAttachment {
			file_id: file_id.to_string(),
			tools: vec![MessageAttachmentTool::FileSearch],
		}]
	});

	CreateMessageRequest {
		role: MessageRole::User,
		content: CreateMessageRequestContent::Content(content.into()),
		attachments,
		..Default::default()
	}
}

// endregion: --- Message Constructors

// region:    --- Content Extractor

/// Text of the first content item, None if that item is not text.
pub fn get_text_content(msg: &MessageObject) -> Option<String> {
	match msg.content.first()? {
		MessageContent::Text(text) => Some(text.text.value.clone()),
		_ => None,
	}
}

pub fn msg_info(msg: MessageObject) -> MsgInfo {
	let text = get_text_content(&msg);
	let role = match msg.role {
		MessageRole::User => MsgRole::User,
		MessageRole::Assistant => MsgRole::Asst,
	};

	MsgInfo {
		id: msg.id,
		role,
		text,
		created_at: i64::from(msg.created_at),
	}
}

// endregion: --- Content Extractor
