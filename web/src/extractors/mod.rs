pub(crate) mod streaming_transport;
