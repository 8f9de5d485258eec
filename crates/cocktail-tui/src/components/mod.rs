pub mod cocktail_detail;
pub mod help_overlay;
