pub mod raytracing;
