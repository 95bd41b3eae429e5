mod packet;
mod response;
mod telegram;
