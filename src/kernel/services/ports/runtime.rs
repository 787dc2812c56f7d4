use std::future::Future;
use std::pin::Pin;

pub type BoxFuture<T = ()> = Pin<Box<dyn Future<Output = T> + Send + 'static>>;
