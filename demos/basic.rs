use urlmodel::{Format, UrlModel};

fn main() {
    // Parse a URL into its components
    let mut url = UrlModel::parse("https://example.com:8080/path?query=value#hash")
        .expect("Failed to parse URL");

    println!("URL: {url}"); // https://example.com:8080/path?query=value#hash
    println!("Scheme: {:?}", url.scheme()); // Some("https")
    println!("Host: {}", url.full_host()); // example.com:8080
    println!("Port: {:?}", url.port()); // Some(8080)
    println!("Path: {}", url.path()); // /path
    println!("Query: {}", url.query_string()); // query=value
    println!("Fragment: {:?}", url.fragment()); // Some("hash")
    println!();

    // Change components and rebuild
    url.set_scheme(None);
    url.set_port(None);
    url.set_path("docs/intro");
    println!("Protocol-relative: {url}"); // //example.com/docs/intro?query=value#hash

    // Same model, relative output
    url.set_preferred_format(Format::Relative);
    println!("Relative: {url}"); // docs/intro?query=value#hash
}
