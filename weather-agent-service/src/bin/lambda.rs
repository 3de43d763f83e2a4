//! AWS Lambda entry point for the weather assistant.

use lambda_runtime::{Error, LambdaEvent, run, service_fn};
use tracing::info;

use weather_agent_service::agent::Agent;
use weather_agent_service::config::load_config;
use weather_agent_service::handler::{InvocationEvent, InvocationResponse, handle_invocation};
use weather_agent_service::logging::{LogFormat, init_logging};
use weather_agent_service::ollama::OllamaClient;

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_logging(LogFormat::Json);

    let config = load_config()?;

    // Constructed outside the handler so warm invocations reuse it
    let agent = Agent::new(OllamaClient::new(config.ollama.clone())?, config.agent.clone());
    info!(model = %config.agent.model, "Lambda handler ready");

    let agent = &agent;
    run(service_fn(
        move |event: LambdaEvent<InvocationEvent>| async move {
            info!(request_id = %event.context.request_id, "Invocation received");
            Ok::<InvocationResponse, Error>(handle_invocation(agent, &event.payload).await)
        },
    ))
    .await
}
