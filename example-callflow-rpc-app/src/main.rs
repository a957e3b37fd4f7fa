use callflow_rpc_service::RpcMethod;
use callflow_tokio_rpc_server::{CallEvent, RpcServer};
use example_callflow_rpc_app::{config_from_env, register_example_handlers};
use example_callflow_rpc_service_definition::{Chat, Echo, Repeat, RepeatRequest, Sum};
use std::error::Error;
use tokio::join;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let server = RpcServer::new(config_from_env());
    register_example_handlers(server.endpoint().as_ref()).await?;

    let handle = server.handle();
    let server_task = tokio::spawn(server.serve());

    let echo = async {
        let peer = handle.call(Echo::METHOD_NAME).await?;
        peer.send(Echo::encode_request(b"hello".to_vec())?).await?;
        let (responses, status) = peer.finish().await;
        let echoed = responses
            .first()
            .map(|bytes| Echo::decode_response(bytes))
            .transpose()?;
        Ok::<_, Box<dyn Error + Send + Sync>>((echoed, status))
    };

    let sum = async {
        let peer = handle.call(Sum::METHOD_NAME).await?;
        for value in [1.0, 2.0, 3.0, 4.5] {
            peer.send(Sum::encode_request(value)?).await?;
        }
        let (responses, status) = peer.finish().await;
        let total = responses
            .first()
            .map(|bytes| Sum::decode_response(bytes))
            .transpose()?;
        Ok::<_, Box<dyn Error + Send + Sync>>((total, status))
    };

    let repeat = async {
        let peer = handle.call(Repeat::METHOD_NAME).await?;
        peer.send(Repeat::encode_request(RepeatRequest {
            text: "ping".into(),
            times: 3,
        })?)
        .await?;
        let (responses, status) = peer.finish().await;
        let lines = responses
            .iter()
            .map(|bytes| Repeat::decode_response(bytes))
            .collect::<Result<Vec<_>, _>>()?;
        Ok::<_, Box<dyn Error + Send + Sync>>((lines, status))
    };

    let chat = async {
        let mut peer = handle.call(Chat::METHOD_NAME).await?;
        let mut replies = Vec::new();
        for line in ["hi", "how are you?"] {
            peer.send(Chat::encode_request(line.to_string())?).await?;
            if let Some(CallEvent::Response(bytes)) = peer.recv().await {
                replies.push(Chat::decode_response(&bytes)?);
            }
        }
        let (_, status) = peer.finish().await;
        Ok::<_, Box<dyn Error + Send + Sync>>((replies, status))
    };

    // `join!` drives all four calls concurrently.
    let (echo, sum, repeat, chat) = join!(echo, sum, repeat, chat);

    println!("Result from echo(): {:?}", echo?);
    println!("Result from sum(): {:?}", sum?);
    println!("Result from repeat(): {:?}", repeat?);
    println!("Result from chat(): {:?}", chat?);

    drop(handle);
    let accepted = server_task.await?;
    tracing::info!(accepted, "Demo finished");

    Ok(())
}
