pub mod choropleth;
pub mod contour;
