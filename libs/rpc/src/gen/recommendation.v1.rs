// @generated
// This file is @generated by prost-build.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RecommendationRequest {
    #[prost(string, tag = "1")]
    pub viewer_id: ::prost::alloc::string::String,
    /// Content ids already shown to the viewer; excluded from results.
    #[prost(string, repeated, tag = "2")]
    pub watch_history: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
    /// Content ids used as positive retrieval seeds.
    #[prost(string, repeated, tag = "3")]
    pub successful_plays: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RecommendationResponse {
    #[prost(string, repeated, tag = "1")]
    pub video_ids: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
}
include!("recommendation.v1.tonic.rs");
// @@protoc_insertion_point(module)
