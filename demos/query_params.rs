/// Query parameter usage example
use urlmodel::{QueryValue, UrlModel};

fn main() {
    let mut url = UrlModel::parse("/search?name=John&tags[]=rust&tags[]=url&debug")
        .expect("Failed to parse URL");

    // Get values
    println!("name: {:?}", url.query_param("name")); // Ok(String("John"))
    println!("tags: {:?}", url.query_param("tags")); // Ok(List([...]))
    println!("debug: {:?}", url.query_param("debug")); // Ok(Null)
    println!("missing: {:?}", url.query_param("missing")); // Err(UndefinedParameter("missing"))
    println!(
        "page: {:?}",
        url.query_param_or("page", &QueryValue::from("1"))
    ); // String("1")
    println!();

    // Set and add parameters
    url.set_query_param("name", "Jane");
    url.add_query_params([("page", "2"), ("sort", "date")]);
    println!("After set/add: {url}"); // /search?name=Jane&tags[0]=rust&tags[1]=url&debug&page=2&sort=date

    // Remove parameters
    url.remove_query_param("debug");
    println!("After remove: {url}"); // /search?name=Jane&tags[0]=rust&tags[1]=url&page=2&sort=date

    url.remove_all_query_params();
    println!("After remove all: {url}"); // /search

    // Iterate over all parameters
    let url = UrlModel::parse("/?a=1&b=2").expect("Failed to parse URL");
    println!("All parameters:");
    for (key, value) in url.query().iter() {
        println!("  {key} = {value:?}");
    }
}
