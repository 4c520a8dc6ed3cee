//! Response-capture body decorator.
//!
//! [`CaptureBody`] wraps the downstream response body and duplicates every
//! data frame into an internal buffer while forwarding frames unmodified
//! and in order. Status, headers, and trailers are untouched. When the
//! inner body reaches end-of-stream -- whether the consumer polls through
//! to the final `None` or stops as soon as `is_end_stream()` reports true
//! -- the completion callback receives the accumulated bytes exactly
//! once; a body dropped before completion (client disconnect) fires
//! nothing.

use std::pin::Pin;
use std::task::{Context, Poll, ready};

use axum::body::Body;
use bytes::{Bytes, BytesMut};
use http_body::{Body as HttpBody, Frame, SizeHint};
use pin_project_lite::pin_project;

type OnComplete = Box<dyn FnOnce(Bytes) + Send + 'static>;

pin_project! {
    /// Pass-through body that tees data frames into a buffer.
    pub struct CaptureBody {
        #[pin]
        inner: Body,
        captured: BytesMut,
        on_complete: Option<OnComplete>,
    }
}

impl CaptureBody {
    /// Wrap `inner`, invoking `on_complete` with the captured bytes once
    /// the inner body finishes.
    pub fn new(inner: Body, on_complete: impl FnOnce(Bytes) + Send + 'static) -> Self {
        Self {
            inner,
            captured: BytesMut::new(),
            on_complete: Some(Box::new(on_complete)),
        }
    }
}

impl HttpBody for CaptureBody {
    type Data = Bytes;
    type Error = axum::Error;

    fn poll_frame(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        let mut this = self.project();
        match ready!(this.inner.as_mut().poll_frame(cx)) {
            Some(Ok(frame)) => {
                if let Some(data) = frame.data_ref() {
                    this.captured.extend_from_slice(data);
                }
                // hyper stops polling once the inner body reports
                // end-of-stream, so complete on that signal too rather
                // than waiting for a final `None` that may never come.
                if this.inner.is_end_stream() {
                    if let Some(on_complete) = this.on_complete.take() {
                        on_complete(this.captured.split().freeze());
                    }
                }
                Poll::Ready(Some(Ok(frame)))
            }
            Some(Err(err)) => Poll::Ready(Some(Err(err))),
            None => {
                if let Some(on_complete) = this.on_complete.take() {
                    on_complete(this.captured.split().freeze());
                }
                Poll::Ready(None)
            }
        }
    }

    fn is_end_stream(&self) -> bool {
        self.inner.is_end_stream()
    }

    fn size_hint(&self) -> SizeHint {
        self.inner.size_hint()
    }
}
