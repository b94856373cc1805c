//! GraphQL documents understood by the managed data service.
//!
//! The service exposes a generated schema over the `chats` and `messages`
//! tables (`*_by_pk`, `insert_*_one`, `*_bool_exp` filters).

/// A named GraphQL operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Document {
    pub operation_name: &'static str,
    pub query: &'static str,
}

pub const GET_CHATS: Document = Document {
    operation_name: "GetChats",
    query: r#"query GetChats($where: chats_bool_exp!) {
  chats(where: $where, order_by: { updated_at: desc }) {
    id
    title
    user_id
    created_at
    updated_at
  }
}"#,
};

pub const CREATE_CHAT: Document = Document {
    operation_name: "CreateChat",
    query: r#"mutation CreateChat($object: chats_insert_input!) {
  insert_chats_one(object: $object) {
    id
    title
    user_id
    created_at
    updated_at
  }
}"#,
};

pub const UPDATE_CHAT_TITLE: Document = Document {
    operation_name: "UpdateChatTitle",
    query: r#"mutation UpdateChatTitle($id: uuid!, $title: String!) {
  update_chats_by_pk(pk_columns: { id: $id }, _set: { title: $title, updated_at: "now()" }) {
    id
    title
    user_id
    created_at
    updated_at
  }
}"#,
};

pub const DELETE_CHAT: Document = Document {
    operation_name: "DeleteChat",
    query: r#"mutation DeleteChat($id: uuid!) {
  delete_chats_by_pk(id: $id) {
    id
  }
}"#,
};

pub const GET_MESSAGES: Document = Document {
    operation_name: "GetMessages",
    query: r#"query GetMessages($chatId: uuid!) {
  messages(where: { chat_id: { _eq: $chatId } }, order_by: { created_at: asc }) {
    id
    chat_id
    content
    is_bot
    created_at
  }
}"#,
};

pub const INSERT_MESSAGE: Document = Document {
    operation_name: "InsertMessage",
    query: r#"mutation InsertMessage($chatId: uuid!, $content: String!, $isBot: Boolean!) {
  insert_messages_one(object: { chat_id: $chatId, content: $content, is_bot: $isBot }) {
    id
    chat_id
    content
    is_bot
    created_at
  }
}"#,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_names_match_documents() {
        for doc in [
            GET_CHATS,
            CREATE_CHAT,
            UPDATE_CHAT_TITLE,
            DELETE_CHAT,
            GET_MESSAGES,
            INSERT_MESSAGE,
        ] {
            assert!(
                doc.query.contains(&format!(" {}(", doc.operation_name)),
                "{} does not declare its operation name",
                doc.operation_name
            );
        }
    }

    #[test]
    fn test_message_list_is_oldest_first() {
        assert!(GET_MESSAGES.query.contains("order_by: { created_at: asc }"));
        assert!(GET_CHATS.query.contains("order_by: { updated_at: desc }"));
    }
}
