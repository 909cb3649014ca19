use aws_config::BehaviorVersion;
use aws_config::ConfigLoader;
use aws_sdk_dynamodb::Client as DynamoClient;
use aws_types::region::Region;
use log::info;
use crate::config::Config;

pub async fn create_dynamodb_client(config: &Config) -> DynamoClient {
    let aws_config = ConfigLoader::default()
        .region(config.region.clone().map(Region::new))
        .behavior_version(BehaviorVersion::latest())
        .load()
        .await;

    let mut builder = aws_sdk_dynamodb::config::Builder::from(&aws_config);
    if let Some(endpoint) = &config.dynamodb_endpoint {
        info!("Using DynamoDB endpoint override {}", endpoint);
        builder = builder.endpoint_url(endpoint);
    }

    DynamoClient::from_conf(builder.build())
}
