pub mod buffered;

pub use buffered::BufferedResponse;

/// Mutable carrier of the outgoing HTTP response.
pub trait ResponseSink {
    fn clear_headers(&mut self);

    fn set_status_code(&mut self, code: u16);

    fn set_header(&mut self, name: &str, value: &str);

    fn set_body(&mut self, body: String);

    /// Hands the response to the transport. Nothing is expected to change it
    /// afterwards.
    fn send(&mut self);
}
