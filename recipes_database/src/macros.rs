/// Defines a struct whose sole purpose is wrapping an async [`Stream`],
/// mapping each item using a closure provided by the user.
///
/// # Example
/// ```rust,ignore
/// type RawCategoryStream<'c> = BoxStream<'c, Result<InternalCategoryModel, sqlx::Error>>;
///
/// create_async_stream_wrapper!(
///     pub struct CategoryStream<'c>;
///     transforms stream RawCategoryStream<'c> => stream of QueryResult<CategoryModel>:
///         |value| value.map(|result| result.map(...).map_err(...))
/// );
///
/// // The generated `new` method takes the original stream.
/// let category_stream = CategoryStream::new(raw_stream);
/// ```
///
/// [`Stream`]: futures_core::Stream
macro_rules! create_async_stream_wrapper {
    (
        $struct_visibility:vis struct $struct_identifier:ident<$struct_lifetime:lifetime>;
        transforms stream $wrapped_type:ty => stream of $resulting_type:ty:
            |$captured_value:ident| $mapper:expr
    ) => {
        pin_project_lite::pin_project! {
            $struct_visibility struct $struct_identifier<$struct_lifetime> {
                #[pin]
                wrapped: $wrapped_type
            }
        }

        impl<$struct_lifetime> $struct_identifier<$struct_lifetime> {
            #[inline]
            fn new(wrapped: $wrapped_type) -> Self {
                Self { wrapped }
            }
        }

        impl<$struct_lifetime> futures_core::Stream for $struct_identifier<$struct_lifetime> {
            type Item = $resulting_type;

            fn poll_next(
                self: std::pin::Pin<&mut Self>,
                cx: &mut std::task::Context<'_>,
            ) -> std::task::Poll<Option<Self::Item>> {
                let this = self.project();

                match <$wrapped_type as futures_core::Stream>::poll_next(this.wrapped, cx) {
                    std::task::Poll::Ready($captured_value) => std::task::Poll::Ready($mapper),
                    std::task::Poll::Pending => std::task::Poll::Pending,
                }
            }
        }
    };
}
