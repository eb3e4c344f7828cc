pub mod header;
pub mod method;
pub mod request;
pub mod request_raw;
pub mod response;
pub mod status;
pub mod version;
pub mod writer;

pub use self::header::HttpHeader;
pub use self::method::HttpMethod;
pub use self::request::HttpRequest;
pub use self::request_raw::HttpRequestRaw;
pub use self::response::HttpResponse;
pub use self::status::HttpStatusCode;
pub use self::version::HttpVersion;
pub use self::writer::ResponseWriter;
