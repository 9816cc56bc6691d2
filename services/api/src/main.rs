use pie_destroyer_api::run;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("pie chart destroyer failed: {err}");
        std::process::exit(1);
    }
}
