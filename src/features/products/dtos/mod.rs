mod product_dto;

pub use product_dto::{
    CreateProductDto, ProductForm, ProductInput, ProductResponseDto, ProductView,
};
