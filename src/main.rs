#[actix_web::main]
async fn main() -> std::io::Result<()> {
    ieee_paper_generator::run().await
}
