use crate::error::CliError;
use crate::stdio::write_text;
use stratus_core::Assistant;
use stratus_core::model::ReasoningEngine;
use tokio::io::AsyncWrite;
use tracing::warn;

pub const DEMO_QUERIES: [&str; 4] = [
    "What's the weather in Tokyo?",
    "Give me a 5-day forecast for Paris",
    "Compare the weather in New York and London",
    "Which city has the best weather right now?",
];

/// Ask each canned question in turn. A failed question does not stop the rest.
pub async fn run_demo<E, W>(assistant: &Assistant<E>, output: &mut W) -> Result<(), CliError>
where
    E: ReasoningEngine,
    W: AsyncWrite + Unpin,
{
    let rule = "=".repeat(60);
    write_text(output, &format!("{rule}\nRunning Example Queries\n{rule}\n")).await?;

    for (index, query) in DEMO_QUERIES.iter().enumerate() {
        write_text(
            output,
            &format!("\n--- Example {} ---\nQuery: {query}\n\nResponse:\n", index + 1),
        )
        .await?;
        let response = match assistant.ask(query).await {
            Ok(answer) => answer,
            Err(err) => {
                warn!(query, %err, "Example query failed");
                format!("Error: {}", err.user_message())
            }
        };
        write_text(output, &format!("{response}\n\n{}\n", "-".repeat(60))).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stdio::tests::echo_assistant;

    #[tokio::test]
    async fn asks_every_example_in_order() {
        let assistant = echo_assistant().await;
        let mut output = Vec::new();

        run_demo(&assistant, &mut output).await.expect("demo");

        let questions = assistant.engine().questions.lock().expect("lock").clone();
        assert_eq!(questions, DEMO_QUERIES.to_vec());
        let text = String::from_utf8(output).expect("utf8");
        assert!(text.contains("--- Example 4 ---"));
        assert!(text.contains("echo: Give me a 5-day forecast for Paris"));
    }
}
