pub mod conversion_delegate;
