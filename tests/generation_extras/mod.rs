use async_trait::async_trait;
use llm::chat::{ChatMessage, ChatProvider, ChatResponse, Tool};
use llm::error::LLMError;

#[macro_export]
macro_rules! assert_blog_outputs {
    (
        $(
            $test_name:ident : response => $response:expr, body => $body:expr, links => $links:expr
        ),+ $(,)?
    ) => {
        $(
            #[tokio::test]
            async fn $test_name() {
                let provider = CannedChat::new($response);
                let context = blogsmith::llm::LlmContext {
                    model: &provider,
                    rate_limiter: None,
                };
                let request = blogsmith::blog::BlogRequest {
                    company_info: "A friendly widget maker.",
                    topic: "Choosing the right widget",
                    keywords: "widgets, widget maintenance",
                    word_range: blogsmith::WordRange::default(),
                    anchor_style: blogsmith::AnchorStyle::default(),
                    link_count: 5,
                    inventory: &[],
                };

                let post = blogsmith::blog::generate_blog(&context, &request)
                    .await
                    .expect("Expected a generated post.");

                assert_that(&post.body).is_equal_to($body.to_owned());
                assert_that(&post.internal_links.len()).is_equal_to($links);
            }
        )+
    }
}

/// Chat provider that replies with one canned response, whatever the prompt.
pub(crate) struct CannedChat {
    reply: String,
}

impl CannedChat {
    pub fn new(reply: impl Into<String>) -> Self {
        CannedChat {
            reply: reply.into(),
        }
    }
}

#[derive(Debug)]
struct CannedResponse(String);

impl ChatResponse for CannedResponse {
    fn text(&self) -> Option<String> {
        Some(self.0.clone())
    }

    fn tool_calls(&self) -> Option<Vec<llm::ToolCall>> {
        None
    }

    fn thinking(&self) -> Option<String> {
        None
    }

    fn usage(&self) -> Option<llm::chat::Usage> {
        None
    }
}

impl std::fmt::Display for CannedResponse {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

#[async_trait]
impl ChatProvider for CannedChat {
    async fn chat(&self, _messages: &[ChatMessage]) -> Result<Box<dyn ChatResponse>, LLMError> {
        Ok(Box::new(CannedResponse(self.reply.clone())) as Box<dyn ChatResponse>)
    }

    async fn chat_with_tools(
        &self,
        messages: &[ChatMessage],
        _tools: Option<&[Tool]>,
    ) -> Result<Box<dyn ChatResponse>, LLMError> {
        self.chat(messages).await
    }
}
