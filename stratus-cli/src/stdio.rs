use crate::error::CliError;
use stratus_core::Assistant;
use stratus_core::model::ReasoningEngine;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};

const EXIT_COMMANDS: [&str; 3] = ["quit", "exit", "q"];

/// Interactive loop: one question per line until an exit command or EOF.
///
/// Failures are printed and the loop keeps going.
pub async fn run_chat<E, R, W>(
    assistant: &Assistant<E>,
    input: R,
    output: &mut W,
) -> Result<(), CliError>
where
    E: ReasoningEngine,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    print_banner(assistant, output).await?;

    loop {
        write_text(output, "\nYou: ").await?;
        let Some(line) = lines.next_line().await? else {
            debug!("stdin closed");
            write_text(output, "\nGoodbye!\n").await?;
            break;
        };

        let question = line.trim();
        if question.is_empty() {
            continue;
        }
        if EXIT_COMMANDS.contains(&question.to_lowercase().as_str()) {
            write_text(output, "\nGoodbye!\n").await?;
            break;
        }

        match assistant.ask(question).await {
            Ok(answer) => write_text(output, &format!("\nAssistant: {answer}\n")).await?,
            Err(err) => {
                warn!(%err, "Question failed");
                write_text(output, &format!("\nError: {}\n", err.user_message())).await?;
            }
        }
    }
    Ok(())
}

async fn print_banner<E, W>(assistant: &Assistant<E>, output: &mut W) -> Result<(), CliError>
where
    E: ReasoningEngine,
    W: AsyncWrite + Unpin,
{
    let rule = "=".repeat(60);
    let tools = assistant.catalog().names().join(", ");
    write_text(
        output,
        &format!(
            "{rule}\nStratus Weather Assistant (model: {model})\n{rule}\nTools: {tools}\nType 'quit' or 'exit' to close the app.\n",
            model = assistant.model(),
        ),
    )
    .await
}

pub(crate) async fn write_text<W>(output: &mut W, text: &str) -> Result<(), CliError>
where
    W: AsyncWrite + Unpin,
{
    output.write_all(text.as_bytes()).await?;
    output.flush().await?;
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::{Value, json};
    use std::sync::{Arc, Mutex};
    use stratus_core::SessionOptions;
    use stratus_core::model::ModelError;
    use stratus_core::tooling::{HostError, RemoteTool, ToolHost};
    use stratus_core::types::{AssistantMessage, ToolCatalog, Turn};
    use tokio::io::BufReader;

    pub(crate) struct EchoEngine {
        pub(crate) questions: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ReasoningEngine for EchoEngine {
        fn id(&self) -> &str {
            "echo"
        }

        fn model(&self) -> &str {
            "echo-1"
        }

        async fn complete(
            &self,
            turns: &[Turn],
            _catalog: &ToolCatalog,
        ) -> Result<AssistantMessage, ModelError> {
            let Some(Turn::User(question)) = turns.get(1) else {
                return Err(ModelError::invalid_response("echo", "no question"));
            };
            self.questions
                .lock()
                .expect("lock")
                .push(question.clone());
            if question.contains("fail") {
                return Err(ModelError::invalid_response("echo", "refused"));
            }
            Ok(AssistantMessage::text(format!("echo: {question}")))
        }
    }

    pub(crate) struct CitiesHost;

    #[async_trait]
    impl ToolHost for CitiesHost {
        async fn list_tools(&self) -> Result<Vec<RemoteTool>, HostError> {
            Ok(vec![RemoteTool {
                name: "list_available_cities".into(),
                description: None,
                input_schema: Some(json!({"type": "object", "properties": {}})),
            }])
        }

        async fn call_tool(&self, _name: &str, _arguments: Value) -> Result<String, HostError> {
            Ok("[]".into())
        }
    }

    pub(crate) async fn echo_assistant() -> Assistant<EchoEngine> {
        Assistant::connect(
            EchoEngine {
                questions: Mutex::new(Vec::new()),
            },
            Arc::new(CitiesHost),
            SessionOptions::default(),
        )
        .await
        .expect("session")
    }

    async fn transcript(input: &str) -> (String, Vec<String>) {
        let assistant = echo_assistant().await;
        let mut output = Vec::new();
        run_chat(&assistant, BufReader::new(input.as_bytes()), &mut output)
            .await
            .expect("chat loop");
        let questions = assistant.engine().questions.lock().expect("lock").clone();
        (String::from_utf8(output).expect("utf8"), questions)
    }

    #[tokio::test]
    async fn answers_until_exit_command() {
        let (output, questions) = transcript("weather in Paris?\n\nQUIT\nnever asked\n").await;

        assert!(output.contains("model: echo-1"));
        assert!(output.contains("Tools: list_available_cities"));
        assert!(output.contains("Assistant: echo: weather in Paris?"));
        assert!(output.trim_end().ends_with("Goodbye!"));
        assert_eq!(questions, vec!["weather in Paris?"]);
    }

    #[tokio::test]
    async fn errors_are_printed_and_loop_continues() {
        let (output, questions) = transcript("please fail\nTokyo?\n").await;

        assert!(output.contains("Error: "));
        assert!(output.contains("Assistant: echo: Tokyo?"));
        assert_eq!(questions.len(), 2);
    }

    #[tokio::test]
    async fn end_of_input_exits_cleanly() {
        let (output, questions) = transcript("").await;
        assert!(output.contains("Goodbye!"));
        assert!(questions.is_empty());
    }
}
