#[actix_web::main]
async fn main() -> std::io::Result<()> {
    data_tools_hub_lib::run().await
}
